// crates/cheetah-core/tests/scenarios.rs - End-to-end store behaviour

use cheetah_core::{
    CommandUpdate, NewCommand, SessionManager, SheetRegistry, StoreError, parse_id_list,
};
use proptest::prelude::*;
use std::collections::BTreeSet;
use tempfile::TempDir;

fn vault() -> (TempDir, SessionManager) {
    let temp = TempDir::new().unwrap();
    let registry = SheetRegistry::open(temp.path().to_path_buf()).unwrap();
    (temp, SessionManager::new(registry))
}

fn tag_texts(session: &SessionManager, id: i64) -> BTreeSet<String> {
    session
        .tags()
        .list_for_command(id)
        .unwrap()
        .into_iter()
        .map(|t| t.text)
        .collect()
}

#[test]
fn git_status_lifecycle() {
    let (_temp, mut session) = vault();
    session.create_sheet("dev").unwrap();

    let command = NewCommand::new("git", "status", "show status")
        .unwrap()
        .with_tags(["vcs"]);
    let id = session.commands().insert(&command).unwrap();

    let stored = session.commands().get_by_id(id).unwrap().unwrap();
    assert_eq!(
        (stored.tool.as_str(), stored.args.as_str(), stored.desc.as_str()),
        ("git", "status", "show status")
    );
    assert_eq!(
        tag_texts(&session, id),
        BTreeSet::from(["git".to_string(), "vcs".to_string()])
    );

    let by_tool = session.commands().get_by_tool("git").unwrap();
    assert_eq!(by_tool, vec![stored]);

    assert_eq!(session.commands().delete([id]).unwrap(), 1);
    assert!(session.commands().get_by_id(id).unwrap().is_none());
    assert!(session.tags().list_for_command(id).unwrap().is_empty());
}

#[test]
fn create_select_and_list_in_tool_order() {
    let (_temp, mut session) = vault();
    session.create_sheet("ops").unwrap();
    session.deselect();
    session.select_sheet("ops").unwrap();

    for tool in ["tmux", "awk", "jq"] {
        let command = NewCommand::new(tool, "", "").unwrap();
        session.commands().insert(&command).unwrap();
    }

    let tools: Vec<String> = session
        .commands()
        .get_all()
        .unwrap()
        .into_iter()
        .map(|c| c.tool)
        .collect();
    assert_eq!(tools, vec!["awk", "jq", "tmux"]);
}

#[test]
fn sheets_are_isolated() {
    let (temp, mut session) = vault();
    session.create_sheet("a").unwrap();
    session
        .commands()
        .insert(&NewCommand::new("ls", "", "").unwrap())
        .unwrap();

    session.create_sheet("b").unwrap();
    assert!(session.commands().get_all().unwrap().is_empty());

    session.select_sheet("a").unwrap();
    assert_eq!(session.commands().get_all().unwrap().len(), 1);

    let names: Vec<String> = session
        .registry()
        .list_sheets()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert!(temp.path().join("a.db").is_file());
}

#[test]
fn tag_query_distinguishes_missing_tags() {
    let (_temp, mut session) = vault();
    session.create_sheet("t").unwrap();

    let missing = session.commands().get_by_tags(["ghost"]).unwrap();
    assert!(missing.by_tag.is_empty());
    assert_eq!(missing.not_found, BTreeSet::from(["ghost".to_string()]));

    session
        .commands()
        .insert(&NewCommand::new("nc", "-l 9000", "").unwrap().with_tags(["net"]))
        .unwrap();
    let found = session.commands().get_by_tags(["net"]).unwrap();
    assert_eq!(found.by_tag.len(), 1);
    assert_eq!(found.by_tag["net"].len(), 1);
    assert!(found.not_found.is_empty());
}

#[test]
fn edit_flow_updates_fields_and_tags() {
    let (_temp, mut session) = vault();
    session.create_sheet("edit").unwrap();
    let id = session
        .commands()
        .insert(&NewCommand::new("find", ". -name x", "").unwrap().with_tags(["fs"]))
        .unwrap();

    let update = CommandUpdate {
        args: Some(". -type f -name '*.rs'".into()),
        desc: Some("rust sources".into()),
        ..Default::default()
    };
    assert_eq!(session.commands().update(id, &update).unwrap(), 1);

    session.tags().attach(id, ["rust"]).unwrap();
    assert_eq!(session.tags().detach(id, ["fs"]).unwrap(), 1);

    assert_eq!(
        tag_texts(&session, id),
        BTreeSet::from(["find".to_string(), "rust".to_string()])
    );
    assert_eq!(
        session.commands().get_by_id(id).unwrap().unwrap().desc,
        "rust sources"
    );
}

#[test]
fn every_data_operation_is_gated() {
    let (temp, session) = vault();

    let results = [
        session.commands().get_all().map(|_| ()),
        session.commands().get_by_tool("x").map(|_| ()),
        session.commands().get_by_tags(["x"]).map(|_| ()),
        session
            .commands()
            .insert(&NewCommand::new("x", "", "").unwrap())
            .map(|_| ()),
        session.commands().delete([1]).map(|_| ()),
        session.tags().list_all().map(|_| ()),
        session.tags().list_distinct_tools().map(|_| ()),
        session.tags().attach(1, ["x"]),
        session.tags().detach(1, ["x"]).map(|_| ()),
        session.tags().prune_orphans().map(|_| ()),
    ];

    for result in results {
        assert!(matches!(result, Err(StoreError::NoSheetSelected)));
    }
    // nothing was written to the vault
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn rm_range_input_drives_batch_delete() {
    let (_temp, mut session) = vault();
    session.create_sheet("rm").unwrap();
    for tool in ["a", "b", "c"] {
        session
            .commands()
            .insert(&NewCommand::new(tool, "", "").unwrap())
            .unwrap();
    }

    let ids = parse_id_list("2-5").unwrap();
    let deleted = session.commands().delete(ids.iter().copied()).unwrap();
    assert_eq!((ids.len(), deleted), (4, 2));
    assert_eq!(session.commands().get_all().unwrap().len(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn delete_never_exceeds_request(
        inserted in 0usize..6,
        requested in proptest::collection::btree_set(1i64..12, 0..8),
    ) {
        let (_temp, mut session) = vault();
        session.create_sheet("prop").unwrap();
        for n in 0..inserted {
            let command = NewCommand::new(&format!("tool{n}"), "", "").unwrap();
            session.commands().insert(&command).unwrap();
        }

        let deleted = session.commands().delete(requested.iter().copied()).unwrap();
        prop_assert!(deleted <= requested.len());
        for id in &requested {
            prop_assert!(session.commands().get_by_id(*id).unwrap().is_none());
        }
        prop_assert_eq!(session.commands().get_all().unwrap().len(), inserted - deleted);
    }
}
