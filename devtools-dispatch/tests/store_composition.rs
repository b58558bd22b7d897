//! Store, middleware and reducer composition through the public facade

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use devtools_dispatch::prelude::*;
use devtools_dispatch::{assert_emitted, assert_not_emitted, TestHarness};

#[derive(Action, Clone, Debug, PartialEq)]
enum TestAction {
    Push(&'static str),
    Rename(&'static str),
    Ignored,
}

#[derive(Debug, Default)]
struct Items(Vec<&'static str>);

#[derive(Debug, Default)]
struct Title(String);

#[derive(Debug, Default)]
struct Panel {
    items: Arc<Items>,
    title: Arc<Title>,
}

fn items_reducer(state: &Arc<Items>, action: &TestAction) -> Result<Arc<Items>, ReducerError> {
    match action {
        TestAction::Push(item) => {
            let mut next = state.0.clone();
            next.push(*item);
            Ok(Arc::new(Items(next)))
        }
        _ => unchanged(state),
    }
}

fn title_reducer(state: &Arc<Title>, action: &TestAction) -> Result<Arc<Title>, ReducerError> {
    match action {
        TestAction::Rename(title) if state.0 != *title => Ok(Arc::new(Title(title.to_string()))),
        _ => unchanged(state),
    }
}

combine_reducers! {
    fn panel_reducer(Panel, TestAction) {
        items: items_reducer,
        title: title_reducer,
    }
}

fn tagging(
    label: &'static str,
    trace: Rc<RefCell<Vec<String>>>,
) -> impl Middleware<Panel, TestAction> {
    from_fn(label, move |_api, action: TestAction, next| {
        trace.borrow_mut().push(label.to_string());
        next.run(action)
    })
}

#[test]
fn test_unknown_action_keeps_root_identity() {
    let store = Store::new(Panel::default(), panel_reducer);
    let before = store.state();
    store.dispatch(TestAction::Ignored).unwrap();
    assert!(Arc::ptr_eq(&before, &store.state()));
}

#[test]
fn test_same_title_keeps_root_identity() {
    let store = Store::new(Panel::default(), panel_reducer);
    store.dispatch(TestAction::Rename("This Firefox")).unwrap();
    let before = store.state();
    store.dispatch(TestAction::Rename("This Firefox")).unwrap();
    assert!(Arc::ptr_eq(&before, &store.state()));
}

#[test]
fn test_composed_chain_matches_flat_chain() {
    let flat_trace = Rc::new(RefCell::new(Vec::new()));
    let flat = Store::new(Panel::default(), panel_reducer)
        .with_middleware(tagging("a", Rc::clone(&flat_trace)))
        .with_middleware(tagging("b", Rc::clone(&flat_trace)))
        .with_middleware(tagging("c", Rc::clone(&flat_trace)));

    let nested_trace = Rc::new(RefCell::new(Vec::new()));
    let inner = ComposedMiddleware::new()
        .with(tagging("b", Rc::clone(&nested_trace)))
        .with(tagging("c", Rc::clone(&nested_trace)));
    let nested = Store::new(Panel::default(), panel_reducer)
        .with_middleware(tagging("a", Rc::clone(&nested_trace)))
        .with_middleware(inner);

    flat.dispatch(TestAction::Push("tab")).unwrap();
    nested.dispatch(TestAction::Push("tab")).unwrap();

    assert_eq!(*flat_trace.borrow(), vec!["a", "b", "c"]);
    assert_eq!(*flat_trace.borrow(), *nested_trace.borrow());
    assert_eq!(flat.state().items.0, nested.state().items.0);
}

#[test]
fn test_harness_sees_reduced_actions_only() {
    let store = Store::new(Panel::default(), panel_reducer).with_middleware(from_fn(
        "drop-ignored",
        |_api, action: TestAction, next| {
            if action == TestAction::Ignored {
                return Ok(());
            }
            next.run(action)
        },
    ));
    let harness = TestHarness::from_store(store);

    harness
        .dispatch_all([TestAction::Ignored, TestAction::Push("worker")])
        .unwrap();

    let reduced = harness.drain_emitted();
    assert_emitted!(reduced, TestAction::Push("worker"));
    assert_not_emitted!(reduced, TestAction::Ignored);
    assert_eq!(harness.drain_snapshots().len(), 1);
}
