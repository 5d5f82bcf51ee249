//! Embedded `rhai` runtime

use std::path::Path;

use rhai::module_resolvers::DummyModuleResolver;
use rhai::{Dynamic, Engine, Map, Scope};
use serde::Serialize;

use super::{ScriptGlobals, ScriptRuntime};
use crate::{Error, Result};

/// Resource limits applied to every evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScriptLimits {
    /// Upper bound on evaluated operations (stops runaway loops)
    pub max_operations: u64,
    /// Maximum function call nesting
    pub max_call_levels: usize,
    /// Maximum length of any string value
    pub max_string_size: usize,
    /// Maximum number of array elements
    pub max_array_size: usize,
    /// Maximum number of object map properties
    pub max_map_size: usize,
}

impl Default for ScriptLimits {
    fn default() -> Self {
        Self {
            max_operations: 500_000,
            max_call_levels: 32,
            max_string_size: 65_536,
            max_array_size: 10_000,
            max_map_size: 10_000,
        }
    }
}

/// Sandboxed `rhai` runtime
///
/// A new [`Engine`] and [`Scope`] are built for every call to
/// [`ScriptRuntime::evaluate`]; nothing is shared between scripts. Module
/// imports resolve to nothing, `eval` is disabled, and `print`/`debug` go to
/// the log instead of stdout.
#[derive(Debug, Clone, Default)]
pub struct RhaiRuntime {
    limits: ScriptLimits,
    objects: Vec<String>,
}

impl RhaiRuntime {
    /// Create a runtime with the given limits
    #[must_use]
    pub const fn new(limits: ScriptLimits) -> Self {
        Self {
            limits,
            objects: Vec::new(),
        }
    }

    /// Pre-bind a global to an empty object map before each evaluation
    ///
    /// Lets scripts write `chart.name = "..."` without declaring `chart` first.
    #[must_use]
    pub fn with_object(mut self, name: impl Into<String>) -> Self {
        self.objects.push(name.into());
        self
    }

    /// Limits applied to each evaluation
    #[must_use]
    pub const fn limits(&self) -> &ScriptLimits {
        &self.limits
    }

    fn engine(&self, origin: &Path) -> Engine {
        let mut engine = Engine::new();

        engine.set_module_resolver(DummyModuleResolver::new());
        engine.disable_symbol("eval");

        engine.set_max_operations(self.limits.max_operations);
        engine.set_max_call_levels(self.limits.max_call_levels);
        engine.set_max_string_size(self.limits.max_string_size);
        engine.set_max_array_size(self.limits.max_array_size);
        engine.set_max_map_size(self.limits.max_map_size);

        let script = origin.display().to_string();
        engine.on_print(move |text| tracing::debug!(script = %script, "{text}"));

        let script = origin.display().to_string();
        engine.on_debug(move |text, _source, pos| {
            tracing::debug!(script = %script, position = %pos, "{text}");
        });

        engine
    }
}

impl ScriptRuntime for RhaiRuntime {
    fn evaluate(&self, origin: &Path, source: &str) -> Result<Box<dyn ScriptGlobals>> {
        let engine = self.engine(origin);

        let mut scope: Scope<'static> = Scope::new();
        for name in &self.objects {
            scope.push(name.clone(), Map::new());
        }

        engine
            .run_with_scope(&mut scope, source)
            .map_err(|e| Error::script(origin, e))?;

        Ok(Box::new(RhaiGlobals { scope }))
    }
}

/// Globals left in scope after a `rhai` evaluation
struct RhaiGlobals {
    scope: Scope<'static>,
}

impl ScriptGlobals for RhaiGlobals {
    fn string(&self, key: &str) -> Option<String> {
        let mut segments = key.split('.');
        let mut value = self.scope.get_value::<Dynamic>(segments.next()?)?;

        for segment in segments {
            let map = value.try_cast::<Map>()?;
            value = map.get(segment)?.clone();
        }

        value.into_string().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime() -> RhaiRuntime {
        RhaiRuntime::default().with_object("chart")
    }

    fn eval(runtime: &RhaiRuntime, source: &str) -> Result<Box<dyn ScriptGlobals>> {
        runtime.evaluate(Path::new("test.js"), source)
    }

    #[test]
    fn reads_assigned_properties() {
        let globals = eval(
            &runtime(),
            r#"chart.name = "Test #1"; chart.category = "Test";"#,
        )
        .unwrap();

        assert_eq!(globals.string("chart.name").as_deref(), Some("Test #1"));
        assert_eq!(globals.string("chart.category").as_deref(), Some("Test"));
    }

    #[test]
    fn missing_property_is_none() {
        let globals = eval(&runtime(), r#"chart.name = "Test #2";"#).unwrap();

        assert!(globals.string("chart.category").is_none());
        assert!(globals.string("other.name").is_none());
    }

    #[test]
    fn non_string_value_is_none() {
        let globals = eval(&runtime(), "chart.name = 42; let title = [1, 2];").unwrap();

        assert!(globals.string("chart.name").is_none());
        assert!(globals.string("title").is_none());
        // path through a non-map value
        assert!(globals.string("title.name").is_none());
    }

    #[test]
    fn top_level_string_global() {
        let globals = eval(&RhaiRuntime::default(), r#"let title = "Concordia";"#).unwrap();
        assert_eq!(globals.string("title").as_deref(), Some("Concordia"));
    }

    #[test]
    fn rebinding_the_object_is_honored() {
        let globals = eval(
            &runtime(),
            r#"let chart = #{ name: "Wetherill", category: "Concordia" };"#,
        )
        .unwrap();

        assert_eq!(globals.string("chart.name").as_deref(), Some("Wetherill"));
        assert_eq!(globals.string("chart.category").as_deref(), Some("Concordia"));
    }

    #[test]
    fn syntax_error_fails() {
        let err = eval(&runtime(), "chart.name = ;").err().unwrap();
        assert!(matches!(err, Error::ScriptEvaluation { .. }));
    }

    #[test]
    fn runtime_error_fails() {
        let err = eval(&runtime(), r#"throw "broken";"#).err().unwrap();
        assert!(matches!(err, Error::ScriptEvaluation { .. }));
    }

    #[test]
    fn undeclared_object_fails_without_preset() {
        let result = eval(&RhaiRuntime::default(), r#"chart.name = "x";"#);
        assert!(result.is_err());
    }

    #[test]
    fn runaway_script_is_stopped() {
        let runtime = RhaiRuntime::new(ScriptLimits {
            max_operations: 1_000,
            ..ScriptLimits::default()
        })
        .with_object("chart");

        let result = eval(&runtime, "loop { }");
        assert!(matches!(result, Err(Error::ScriptEvaluation { .. })));
    }

    #[test]
    fn imports_are_not_resolved() {
        let result = eval(&runtime(), r#"import "secrets" as s;"#);
        assert!(result.is_err());
    }

    #[test]
    fn print_does_not_fail_evaluation() {
        let globals = eval(&runtime(), r#"print("hello"); chart.name = "P";"#).unwrap();
        assert_eq!(globals.string("chart.name").as_deref(), Some("P"));
    }

    #[test]
    fn evaluations_are_isolated() {
        let runtime = runtime();
        eval(&runtime, r#"chart.name = "first"; let leaked = "yes";"#).unwrap();

        let second = eval(&runtime, "").unwrap();
        assert!(second.string("chart.name").is_none());
        assert!(second.string("leaked").is_none());
    }
}
