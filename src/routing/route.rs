//! A compiled pattern bound to a target and typed parameters.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::pattern::{Params, PatternCompiler, RenderError, RenderResult, RoutePattern};
use crate::routing::{RouteError, RouteResult};
use crate::value::{StringType, Value, ValueError, ValueOptions, ValueType, ValueTypeRegistry};

/// How one placeholder converts to and from a typed value.
#[derive(Debug, Clone)]
pub struct ParamBinding {
    value_type: Arc<dyn ValueType>,
    options: ValueOptions,
}

impl ParamBinding {
    pub fn new(value_type: Arc<dyn ValueType>, options: ValueOptions) -> Self {
        Self {
            value_type,
            options,
        }
    }

    fn string() -> Self {
        Self::new(Arc::new(StringType), ValueOptions::default())
    }

    pub fn value_type(&self) -> &Arc<dyn ValueType> {
        &self.value_type
    }

    pub fn options(&self) -> &ValueOptions {
        &self.options
    }

    pub fn parse(&self, raw: &str) -> Result<Value, ValueError> {
        self.value_type.parse(&self.options, raw)
    }

    pub fn format(&self, value: &Value) -> Result<String, ValueError> {
        self.value_type.format(&self.options, value)
    }
}

/// A route: pattern, opaque target and one binding per placeholder.
///
/// Placeholders without an explicit binding are strings.
#[derive(Debug, Clone)]
pub struct Route<T> {
    pattern: Arc<RoutePattern>,
    target: T,
    bindings: IndexMap<String, ParamBinding>,
}

impl<T> Route<T> {
    /// A route whose placeholders are all strings.
    pub fn new(pattern: impl Into<Arc<RoutePattern>>, target: T) -> Self {
        let pattern = pattern.into();
        let bindings = pattern
            .param_names()
            .map(|name| (name.to_string(), ParamBinding::string()))
            .collect();
        Self {
            pattern,
            target,
            bindings,
        }
    }

    /// Start building a route from a template.
    pub fn builder(template: impl Into<String>, target: T) -> RouteBuilder<T> {
        RouteBuilder::new(template, target)
    }

    /// Bind a placeholder to a value type.
    pub fn bind(
        mut self,
        name: &str,
        value_type: Arc<dyn ValueType>,
        options: ValueOptions,
    ) -> RouteResult<Self> {
        let Some(binding) = self.bindings.get_mut(name) else {
            return Err(RouteError::UnknownPlaceholder {
                param: name.to_string(),
                template: self.pattern.template().to_string(),
            });
        };
        value_type
            .check_options(&options)
            .map_err(|source| RouteError::InvalidOptions {
                param: name.to_string(),
                source,
            })?;
        *binding = ParamBinding::new(value_type, options);
        Ok(self)
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn binding(&self, name: &str) -> Option<&ParamBinding> {
        self.bindings.get(name)
    }

    /// Parse captured raw values with their bound types.
    ///
    /// Fails on the first parameter, in declaration order, that does not parse.
    pub fn parse_params(&self, raw: &Params) -> Result<IndexMap<String, Value>, (String, ValueError)> {
        self.bindings
            .iter()
            .map(|(name, binding)| {
                let input = raw.get(name).map(String::as_str).unwrap_or_default();
                binding
                    .parse(input)
                    .map(|value| (name.clone(), value))
                    .map_err(|e| (name.clone(), e))
            })
            .collect()
    }

    /// Render a path from typed values, formatting each with its binding
    /// before the constraint check.
    pub fn render(&self, values: &IndexMap<String, Value>) -> RenderResult<String> {
        let mut raw = Params::with_capacity(self.bindings.len());
        for (name, binding) in &self.bindings {
            let Some(value) = values.get(name) else {
                return Err(RenderError::MissingParameter { name: name.clone() });
            };
            let text = binding.format(value).map_err(|source| RenderError::Format {
                name: name.clone(),
                source,
            })?;
            raw.insert(name.clone(), text);
        }
        self.pattern.render(&raw)
    }

    /// Render a path from raw strings.
    pub fn render_raw<V: AsRef<str>>(&self, values: &IndexMap<String, V>) -> RenderResult<String> {
        self.pattern.render(values)
    }
}

#[derive(Debug, Clone, Default)]
struct ParamSpec {
    type_name: Option<String>,
    format: Option<String>,
    pattern: Option<String>,
}

/// Declarative route construction: types by registry name, date formats and
/// per-parameter constraints declared outside the template.
#[derive(Debug, Clone)]
pub struct RouteBuilder<T> {
    template: String,
    target: T,
    params: IndexMap<String, ParamSpec>,
}

impl<T> RouteBuilder<T> {
    pub fn new(template: impl Into<String>, target: T) -> Self {
        Self {
            template: template.into(),
            target,
            params: IndexMap::new(),
        }
    }

    /// Declare the value type of a placeholder by registry name.
    pub fn param_type(mut self, name: &str, type_name: &str) -> Self {
        self.spec(name).type_name = Some(type_name.to_string());
        self
    }

    /// Declare the conversion format of a placeholder.
    pub fn param_format(mut self, name: &str, format: &str) -> Self {
        self.spec(name).format = Some(format.to_string());
        self
    }

    /// Declare a constraint for a placeholder that has no inline one.
    pub fn param_pattern(mut self, name: &str, pattern: &str) -> Self {
        self.spec(name).pattern = Some(pattern.to_string());
        self
    }

    fn spec(&mut self, name: &str) -> &mut ParamSpec {
        self.params.entry(name.to_string()).or_default()
    }

    /// Compile the template and resolve every declared type.
    pub fn build(
        self,
        compiler: &PatternCompiler,
        registry: &ValueTypeRegistry,
    ) -> RouteResult<Route<T>> {
        let declared: IndexMap<String, String> = self
            .params
            .iter()
            .filter_map(|(name, spec)| spec.pattern.clone().map(|p| (name.clone(), p)))
            .collect();
        let pattern = compiler.compile_with(&self.template, &declared)?;
        let mut route = Route::new(pattern, self.target);

        for (name, spec) in self.params {
            if spec.type_name.is_none() && spec.format.is_none() {
                continue;
            }
            let type_name = spec.type_name.as_deref().unwrap_or("string");
            let value_type =
                registry
                    .lookup(type_name)
                    .ok_or_else(|| RouteError::UnknownValueType {
                        param: name.clone(),
                        type_name: type_name.to_string(),
                    })?;
            let options = ValueOptions {
                format: spec.format,
            };
            route = route.bind(&name, value_type, options)?;
        }
        Ok(route)
    }
}
