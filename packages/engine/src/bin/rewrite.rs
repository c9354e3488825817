//! CLI binary for rewriting a node tree document via stdin.
//!
//! Usage:
//!   echo '{"props": {"element": "span", "className": "a"}, "tree": {"type": "partial", "props": {"className": "a b"}, "children": "x"}}' \
//!     | cargo run --features cli --bin rewrite
//!
//! Input (JSON on stdin):
//!   - tree: Any: the document describing the partial element's children
//!   - props: Object: the partial element's own properties
//!   - strategies: Optional<Object>: extra merge strategies, key to strategy name
//!   - strategies_yaml: Optional<String>: extra merge strategies as a YAML mapping
//!   - trace: Optional<bool>: include the rewrite trace in the response
//!
//! Output (JSON on stdout):
//!   - output: Any: the rewritten tree in document form
//!   - markup: String: the rewritten tree rendered as markup
//!   - trace: Optional<Object>: the rewrite steps, when requested
//!   - error: Optional<String>: error message if the rewrite failed
//!
//! Logging goes to stderr and honors RUST_LOG.

use partial_element_engine::document::props_from_json;
use partial_element_engine::{
    node_to_json, DocumentReader, MergeStrategy, Rewriter, StrategyTable, TraceBuilder, TraceStep,
};
use std::collections::BTreeMap;
use std::io::Read;

#[derive(serde::Deserialize)]
struct RewriteRequest {
    tree: serde_json::Value,
    #[serde(default)]
    props: Option<serde_json::Value>,
    #[serde(default)]
    strategies: BTreeMap<String, String>,
    #[serde(default)]
    strategies_yaml: Option<String>,
    #[serde(default)]
    trace: bool,
}

#[derive(serde::Serialize)]
struct RewriteResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    markup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<TraceStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn error_response(msg: String) -> RewriteResponse {
    RewriteResponse {
        output: None,
        markup: None,
        trace: None,
        error: Some(msg),
    }
}

fn fail(msg: String) -> ! {
    let resp = error_response(msg);
    println!("{}", serde_json::to_string(&resp).unwrap_or_default());
    std::process::exit(1);
}

fn build_strategies(request: &RewriteRequest) -> partial_element_engine::Result<StrategyTable> {
    let mut table = StrategyTable::default();
    if let Some(yaml) = &request.strategies_yaml {
        table.extend_from_yaml(yaml)?;
    }
    for (key, name) in &request.strategies {
        table.register(key.clone(), name.parse::<MergeStrategy>()?);
    }
    Ok(table)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        fail(format!("Failed to read stdin: {e}"));
    }

    let request: RewriteRequest = match serde_json::from_str(&input) {
        Ok(r) => r,
        Err(e) => fail(format!("Failed to parse request JSON: {e}")),
    };

    let strategies = match build_strategies(&request) {
        Ok(table) => table,
        Err(e) => fail(format!("Invalid strategy configuration: {e}")),
    };

    let props = match request.props.as_ref().map(props_from_json).transpose() {
        Ok(props) => props.unwrap_or_default(),
        Err(e) => fail(format!("Invalid props: {e}")),
    };

    let tree = match DocumentReader::new().read(&request.tree) {
        Ok(tree) => tree,
        Err(e) => fail(format!("Invalid tree: {e}")),
    };

    let rewriter = Rewriter::with_strategies(strategies);
    let mut trace = if request.trace {
        TraceBuilder::new()
    } else {
        TraceBuilder::disabled()
    };

    match rewriter.render_partial_traced(&props, &tree, &mut trace) {
        Ok(output) => {
            let resp = RewriteResponse {
                output: Some(node_to_json(&output)),
                markup: Some(output.to_string()),
                trace: trace.build(),
                error: None,
            };
            println!("{}", serde_json::to_string(&resp).unwrap_or_default());
        }
        Err(e) => fail(format!("{e}")),
    }
}
