mod common;

use common::fixtures::{cousins, family, siblings};
use common::{TestResult, names};
use std::cell::RefCell;
use std::rc::Rc;
use treepath::{
    Axis, FunctionRegistry, LocationStep, NodeRef, NodeTest, ParentIndex, PathError,
    PathExpression, Predicate, evaluate, evaluate_scalar,
};

fn no_functions<'a>() -> FunctionRegistry<NodeRef<'a>> {
    FunctionRegistry::new()
}

#[test]
fn test_find_children_by_ast() -> TestResult {
    let tree = siblings();
    let root = NodeRef::new(&tree);
    let expr = PathExpression::simple(
        false,
        vec![LocationStep::new(Axis::Child, NodeTest::Any, vec![])],
    );
    let found = evaluate(root, &expr, &no_functions())?;
    assert_eq!(names(&found), vec!["Thing1", "Thing2"]);
    Ok(())
}

#[test]
fn test_find_grandchildren_in_descendant_order() -> TestResult {
    let tree = cousins();
    let root = NodeRef::new(&tree);
    let found = evaluate(root, "descendant::*", &no_functions())?;
    assert_eq!(names(&found), vec!["Thing1", "Thing2", "Grandkid1", "Grandkid2"]);
    Ok(())
}

#[test]
fn test_nested_predicate_match() -> TestResult {
    let tree = cousins();
    let root = NodeRef::new(&tree);
    let expr = PathExpression::simple(
        false,
        vec![
            LocationStep::new(
                Axis::DescendantOrSelf,
                NodeTest::Any,
                vec![Predicate::nested("/Thing1".parse()?)],
            ),
            LocationStep::new(Axis::Child, NodeTest::named("Thing2"), vec![]),
        ],
    );
    let found = evaluate(root, &expr, &no_functions())?;
    assert_eq!(found, vec![NodeRef::new(&tree.children[1])]);
    Ok(())
}

#[test]
fn test_nested_predicate_excludes() -> TestResult {
    let tree = cousins();
    let root = NodeRef::new(&tree);
    let found = evaluate(root, "descendant-or-self::*[/no/such/thing]", &no_functions())?;
    assert!(found.is_empty());
    Ok(())
}

#[test]
fn test_function_predicates() -> TestResult {
    let tree = siblings();
    let root = NodeRef::new(&tree);
    let expr = "/*[@value='x'][?veto]";

    let never = FunctionRegistry::<NodeRef<'_>>::new().with("veto", |_, _, _| false);
    assert!(evaluate(root, expr, &never)?.is_empty());

    let always = FunctionRegistry::<NodeRef<'_>>::new().with("veto", |_, _, _| true);
    assert_eq!(evaluate(root, expr, &always)?.len(), 2);

    let computing =
        FunctionRegistry::<NodeRef<'_>>::new().with("veto", |n, _, _| n.node().name == "Thing1");
    assert_eq!(names(&evaluate(root, expr, &computing)?), vec!["Thing1"]);
    Ok(())
}

#[test]
fn test_function_receives_candidate_set() -> TestResult {
    let tree = siblings();
    let root = NodeRef::new(&tree);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let registry = FunctionRegistry::<NodeRef<'_>>::new().with("spy", move |n, candidates, _| {
        log.borrow_mut().push((n.node().name.clone(), candidates.len()));
        true
    });
    evaluate(root, "/*[?spy]", &registry)?;
    assert_eq!(
        *seen.borrow(),
        vec![("Thing1".to_string(), 2), ("Thing2".to_string(), 2)]
    );
    Ok(())
}

#[test]
fn test_missing_function_predicate() {
    let tree = siblings();
    let root = NodeRef::new(&tree);
    let result = evaluate(root, "/*[@value='x'][?veto]", &no_functions());
    match result {
        Err(e @ PathError::MissingFunctions(_)) => assert!(e.to_string().contains("veto")),
        other => panic!("Expected a registry failure, got {:?}", other),
    }
}

#[test]
fn test_siblings() -> TestResult {
    let tree = siblings();
    let root = NodeRef::new(&tree);
    let thing1 = NodeRef::new(&tree.children[0]);
    let thing2 = NodeRef::new(&tree.children[1]);
    let registry = no_functions();

    let following = evaluate_scalar(root, "/*[@value='x'][1]/following-sibling::Thing2", &registry)?;
    assert_eq!(following, Some(thing2));
    let preceding = evaluate_scalar(root, "/*[@value='x'][2]/preceding-sibling::Thing1", &registry)?;
    assert_eq!(preceding, Some(thing1));
    Ok(())
}

#[test]
fn test_preceding_sibling_in_predicate() -> TestResult {
    let tree = siblings();
    let index = ParentIndex::build(&tree);
    let root = index.root();
    let thing2 = index.get(&tree.children[1]);
    let registry = no_functions();

    assert_eq!(evaluate_scalar(root, "/*[@value='x'][/preceding-sibling::*]", &registry)?, Some(thing2));
    assert_eq!(evaluate_scalar(root, "/*[/preceding-sibling::Thing1]", &registry)?, Some(thing2));

    // Without back-references a nested expression cannot see above its candidate.
    let plain = NodeRef::new(&tree);
    assert_eq!(evaluate_scalar(plain, "/*[/preceding-sibling::Thing1]", &registry)?, None);
    Ok(())
}

#[test]
fn test_nested_predicate_has_no_ancestors() -> TestResult {
    let tree = family();
    let index = ParentIndex::build(&tree);
    let registry = no_functions();

    for root in [NodeRef::new(&tree), index.root()] {
        assert!(evaluate(root, "//Thing1[ancestor::Thing2]", &registry)?.is_empty());
        assert!(evaluate(root, "//Thing1[ancestor-or-self::Thing2]", &registry)?.is_empty());
    }
    assert_eq!(names(&evaluate(index.root(), "//Thing1[../self::Thing2]", &registry)?), vec!["Thing1"]);
    assert!(evaluate(NodeRef::new(&tree), "//Thing1[../self::Thing2]", &registry)?.is_empty());
    Ok(())
}

#[test]
fn test_self_expression() -> TestResult {
    let tree = family();
    let root = NodeRef::new(&tree);
    assert_eq!(evaluate(root, ".", &no_functions())?, vec![root]);

    let kid = NodeRef::new(&tree.children[0]);
    let registry = no_functions();
    let ctx = treepath::EvaluationContext::new(root, &registry);
    assert_eq!(ctx.evaluate(kid, ".")?, vec![kid]);
    Ok(())
}

#[test]
fn test_evaluation_is_repeatable() -> TestResult {
    let tree = cousins();
    let index = ParentIndex::build(&tree);
    let root = index.root();
    let registry = FunctionRegistry::with_builtins();
    let expression: PathExpression =
        "//*[?terminal] | /Thing2/Grandkid2/ancestor::* | //Grandkid1/..".parse()?;

    let first = evaluate(root, &expression, &registry)?;
    let second = evaluate(root, &expression, &registry)?;
    assert!(!first.is_empty());
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_ancestors_and_parent() -> TestResult {
    let tree = family();
    for indexed in [false, true] {
        let index = ParentIndex::build(&tree);
        let root = if indexed { index.root() } else { NodeRef::new(&tree) };
        let registry = no_functions();

        let ancestors = evaluate(root, "//Thing1/ancestor::*", &registry)?;
        assert_eq!(names(&ancestors), vec!["foo", "Thing2"]);
        let with_self = evaluate(root, "//Thing1/ancestor-or-self::*", &registry)?;
        assert_eq!(names(&with_self), vec!["foo", "Thing2", "Thing1"]);
        assert_eq!(names(&evaluate(root, "//Thing1/parent::*", &registry)?), vec!["Thing2"]);
        assert_eq!(names(&evaluate(root, "//Thing1/..", &registry)?), vec!["Thing2"]);
        assert_eq!(names(&evaluate(root, "/descendant::*", &registry)?), vec!["Thing2", "Thing1"]);
    }
    Ok(())
}

#[test]
fn test_builtin_functions() -> TestResult {
    let tree = family();
    let root = NodeRef::new(&tree);
    let registry = FunctionRegistry::with_builtins();
    assert_eq!(names(&evaluate(root, "//*[?terminal]", &registry)?), vec!["Thing1"]);
    assert_eq!(names(&evaluate(root, "//*[?last]", &registry)?), vec!["foo"]);
    Ok(())
}

#[test]
fn test_evaluate_reuses_parsed_expression() -> TestResult {
    let expression: PathExpression = "//Thing1".parse()?;
    for tree in [family(), siblings()] {
        let root = NodeRef::new(&tree);
        assert_eq!(evaluate(root, &expression, &no_functions())?.len(), 1);
    }
    Ok(())
}
