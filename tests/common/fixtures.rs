use serde_json::{Value, json};
use treepath::Node;

/// Builds an owned tree from its JSON form.
pub fn tree(value: Value) -> Node {
    serde_json::from_value(value).expect("fixture is a valid tree")
}

/// `foo { Thing2("x") { Thing1("x") } }`
pub fn family() -> Node {
    tree(json!({
        "$name": "foo",
        "$children": [
            { "$name": "Thing2", "$value": "x", "$children": [
                { "$name": "Thing1", "$value": "x" }
            ]}
        ]
    }))
}

/// `foo { Thing1("x"), Thing2("x") }`
pub fn siblings() -> Node {
    tree(json!({
        "$name": "foo",
        "$children": [
            { "$name": "Thing1", "$value": "x" },
            { "$name": "Thing2", "$value": "x" }
        ]
    }))
}

/// `foo { Thing1 { Grandkid1 }, Thing2 { Grandkid2 } }`
pub fn cousins() -> Node {
    tree(json!({
        "$name": "foo",
        "$children": [
            { "$name": "Thing1", "$children": [ { "$name": "Grandkid1" } ] },
            { "$name": "Thing2", "$children": [ { "$name": "Grandkid2" } ] }
        ]
    }))
}

/// A small parse tree of `let x = 1;`, with offsets.
pub const STATEMENT_JSON: &str = r#"{
    "$name": "program",
    "$offset": 0,
    "$children": [
        {
            "$name": "statement",
            "$offset": 0,
            "kind": "declaration",
            "$children": [
                { "$name": "keyword", "$value": "let", "$offset": 0 },
                { "$name": "identifier", "$value": "x", "$offset": 4 },
                { "$name": "number", "$value": "1", "$offset": 8 }
            ]
        }
    ]
}"#;

pub const CATALOG_XML: &str = r#"<?xml version="1.0"?>
<catalog>
    <book id="b1" lang="en">
        <title>Dune</title>
        <author>Frank Herbert</author>
    </book>
    <book id="b2" lang="fr">
        <title>Vendredi</title>
        <author>Michel Tournier</author>
    </book>
    <magazine id="m1">
        <title>Byte</title>
    </magazine>
</catalog>
"#;
