//! End-to-end walkthrough: one JSON document in, Dart classes out.
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let document = json!({
        "id": 1,
        "name": "x",
        "tags": ["a", "b"],
        "scores": [1, 2.5, null],
        "owner": { "user_name": "kay", "verified": true },
        "items": [
            { "sku": "a-1", "qty": 2 },
            { "sku": "b-7", "qty": 5 }
        ]
    });

    let root = json2dart::AstNode::from_value(&document);
    let forest = json2dart::synthesize(&root, "AutoGenerate")?;

    eprintln!("classes: {:?}", forest.keys().collect::<Vec<_>>());
    println!("{}", json2dart::render_dart(&forest));
    Ok(())
}
