#![deny(clippy::all)]

use napi::bindgen_prelude::*;
use napi_derive::napi;
use view_compiler::{CompilerConfig, ResourceRegistry, TemplateCompiler};

fn to_napi_error(err: view_compiler::CompilerError) -> Error {
  Error::new(Status::InvalidArg, err.to_string())
}

fn load_registry(resources_json: Option<String>) -> Result<ResourceRegistry> {
  match resources_json {
    Some(json) => ResourceRegistry::from_json(&json).map_err(to_napi_error),
    None => Ok(ResourceRegistry::with_builtins()),
  }
}

fn load_config(config_json: Option<String>) -> Result<CompilerConfig> {
  match config_json {
    Some(json) => CompilerConfig::from_json(&json).map_err(to_napi_error),
    None => Ok(CompilerConfig::default()),
  }
}

/// Compile `markup` and return the definition as JSON.
///
/// `resources_json` is an array of resource descriptors; the built-in
/// controllers (`if`, `else`, `repeat`, `with`) are always available.
#[napi(js_name = "compileTemplate")]
pub fn compile_template(markup: String, resources_json: Option<String>, config_json: Option<String>) -> Result<String> {
  let registry = load_registry(resources_json)?;
  let config = load_config(config_json)?;

  let definition = TemplateCompiler::new(&registry)
    .with_config(config)
    .compile(&markup)
    .map_err(to_napi_error)?;
  definition.to_json().map_err(to_napi_error)
}

#[napi]
pub struct Compiler {
  registry: ResourceRegistry,
  config: CompilerConfig,
}

#[napi]
impl Compiler {
  #[napi(constructor)]
  pub fn new(resources_json: Option<String>, config_json: Option<String>) -> Result<Self> {
    Ok(Compiler {
      registry: load_registry(resources_json)?,
      config: load_config(config_json)?,
    })
  }

  #[napi]
  pub fn compile(&self, markup: String) -> Result<String> {
    TemplateCompiler::new(&self.registry)
      .with_config(self.config.clone())
      .compile(&markup)
      .and_then(|definition| definition.to_json())
      .map_err(to_napi_error)
  }

  /// Compile many templates in parallel; each entry is JSON or an error string.
  #[napi]
  pub fn compile_all(&self, markups: Vec<String>) -> Vec<String> {
    let refs: Vec<&str> = markups.iter().map(String::as_str).collect();
    TemplateCompiler::new(&self.registry)
      .with_config(self.config.clone())
      .compile_all(&refs)
      .into_iter()
      .map(|result| match result.and_then(|definition| definition.to_json()) {
        Ok(json) => json,
        Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
      })
      .collect()
  }
}
