//! Property tests for the selection invariant.

mod common;

use ags_session::{Session, ViewState};
use proptest::prelude::*;

use common::{dataset, loaded};

#[derive(Debug, Clone)]
enum Event {
    Load(Vec<String>),
    FailLoad,
    Select(String),
}

fn table_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["PROJ", "LOCA", "GEOL", "SAMP", "ISPT"]).prop_map(str::to_string)
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        prop::collection::btree_set(table_name(), 0..4)
            .prop_map(|names| Event::Load(names.into_iter().collect())),
        Just(Event::FailLoad),
        table_name().prop_map(Event::Select),
    ]
}

fn apply(session: &mut Session, event: &Event) {
    match event {
        Event::Load(names) => {
            let datasets = names
                .iter()
                .map(|name| dataset(name, &["HEADING"], &[&["DATA"]]))
                .collect();
            session
                .apply_load(Ok(loaded("gen.ags", datasets)))
                .expect("generated load is valid");
        }
        Event::FailLoad => {
            let _ = session.upload("broken.ags", b"\"DATA\"\n");
        }
        Event::Select(name) => {
            let before = session.selection().get().map(str::to_string);
            if session.select(name).is_err() {
                assert_eq!(session.selection().get().map(str::to_string), before);
            }
        }
    }
}

proptest! {
    #[test]
    fn selection_always_names_a_stored_table(events in prop::collection::vec(event(), 0..24)) {
        let mut session = Session::default();
        for event in &events {
            apply(&mut session, event);

            let store = session.store();
            match session.selection().get() {
                None => prop_assert!(store.is_empty()),
                Some(name) => prop_assert!(store.contains(name)),
            }
            let view = session.projection();
            prop_assert_ne!(view.state, ViewState::TableNotFound);
            prop_assert_eq!(view.can_export(), session.export().is_ok());
        }
    }
}
