#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
use pyo3::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod ast;
mod error;
mod lexer;
mod parser;
mod renderer;
mod session;
mod types;

pub use ast::{Node, NodeKind, Role, Tree};
pub use error::GrammarError;
pub use lexer::{tokenize, Token};
pub use parser::parse;
pub use renderer::{
    render, PrepositionPlacement, RenderOptions, Renderer, OBLIQUE_PLACEHOLDER,
};
pub use session::Session;
pub use types::StagOutput;

/// Parses and renders in one step, keeping the tree for serialization.
pub fn compile(text: &str, options: RenderOptions) -> Result<StagOutput, GrammarError> {
    let tree = parser::parse(text)?;
    let text = Renderer::with_options(options).render(&tree);
    Ok(StagOutput { text, tree })
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
fn py_value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
#[pyfunction]
fn render_text(text: String) -> PyResult<String> {
    let tree = parser::parse(&text).map_err(py_value_error)?;
    Ok(render(&tree))
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
#[pyfunction]
fn compile_text(text: String) -> PyResult<String> {
    let output = compile(&text, RenderOptions::default()).map_err(py_value_error)?;

    serde_json::to_string_pretty(&output)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
#[pyfunction]
fn compile_text_with_options(text: String, options_json: String) -> PyResult<String> {
    let options = RenderOptions::from_json(&options_json).map_err(py_value_error)?;
    let output = compile(&text, options).map_err(py_value_error)?;

    serde_json::to_string_pretty(&output)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn compile_text_wasm(text: &str) -> Result<String, JsValue> {
    let output =
        compile(text, RenderOptions::default()).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string_pretty(&output).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn compile_text_with_options_wasm(text: &str, options_json: &str) -> Result<String, JsValue> {
    let options =
        RenderOptions::from_json(options_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let output = compile(text, options).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string_pretty(&output).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
#[pymodule]
fn stag_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(render_text, m)?)?;
    m.add_function(wrap_pyfunction!(compile_text, m)?)?;
    m.add_function(wrap_pyfunction!(compile_text_with_options, m)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn run_fixture(name: &str, cfg: &serde_json::Value) {
        let input = cfg["input"].as_str().expect("fixture needs an input");
        let options = match cfg.get("options") {
            Some(v) => serde_json::from_value(v.clone()).expect("Invalid fixture options"),
            None => RenderOptions::default(),
        };

        let mut session = Session::with_options(options);
        match cfg.get("error").and_then(|v| v.as_str()) {
            Some(expected) => {
                let err = session.parse(input).expect_err("fixture should fail");
                assert_eq!(err.to_string(), expected, "Mismatch in fixture {}", name);
                assert_eq!(session.render(), "");
            }
            None => {
                session
                    .parse(input)
                    .unwrap_or_else(|e| panic!("fixture {} failed to parse: {}", name, e));
                let expected = cfg["expected"].as_str().expect("fixture needs expected");
                assert_eq!(session.render(), expected, "Mismatch in fixture {}", name);
            }
        }
    }

    #[test]
    fn test_fixtures() {
        let fixtures_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/sentences.json");
        let fixtures_text =
            fs::read_to_string(fixtures_path).expect("Failed to read sentences.json");
        let fixtures: serde_json::Value =
            serde_json::from_str(&fixtures_text).expect("Invalid sentences.json");
        let obj = fixtures
            .as_object()
            .expect("sentences.json must be an object");

        assert!(!obj.is_empty());
        for (name, cfg) in obj {
            run_fixture(name, cfg);
        }
    }

    #[test]
    fn compile_carries_text_and_tree() {
        let output = compile(
            "king|is\\Henery VIII [s] The [s] prep: { on;throne [o] the }",
            RenderOptions {
                preposition_placement: PrepositionPlacement::AfterHead,
                ..RenderOptions::default()
            },
        )
        .unwrap();
        assert_eq!(output.text, "The king on the throne is Henery VIII");
        assert_eq!(output.tree.complement().unwrap().value, "Henery VIII");

        assert!(compile("king is The", RenderOptions::default()).is_err());
    }
}
