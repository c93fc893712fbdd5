use jeach_store::{
    Entries, Error, LookupKind, MatchedElement, Projection, Relation, Row, Store, StoreConfig,
    ValueMatch,
};
use serde::Deserialize;
use serde_json::json;

fn store_with(rows: &[(i64, &[i64])]) -> Store {
    let store = Store::open_in_memory(&StoreConfig::default()).unwrap();
    store.create_schema().unwrap();
    for (id, values) in rows {
        let row = Row {
            id: *id,
            entries: Entries::new(values.to_vec()).unwrap(),
        };
        store.insert_row(&row).unwrap();
    }
    store
}

/// The id json_each() assigns to the element at `position` of `entries`.
fn element_id(entries: &str, position: i64) -> i64 {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.query_row(
        "SELECT id FROM json_each(?1) WHERE key = ?2",
        rusqlite::params![entries, position],
        |r| r.get(0),
    )
    .unwrap()
}

#[test]
fn direct_lookup_returns_the_row_id() {
    let store = Store::open_in_memory(&StoreConfig::default()).unwrap();
    store.create_schema().unwrap();
    for values in [vec![1, 2], vec![5], vec![3, 3, 9]] {
        store.insert_entries(&Entries::new(values).unwrap()).unwrap();
    }
    for k in 1..=3 {
        let row = store.direct(k).unwrap().expect("row exists");
        assert_eq!(row["id"], json!(k));
    }
    assert_eq!(store.direct(2).unwrap().unwrap()["entries"], json!("[5]"));
    assert!(store.direct(4).unwrap().is_none());
}

#[test]
fn naive_lookup_reports_the_element_id_as_id() {
    let store = store_with(&[(100, &[2, 4, 6, 8])]);
    let rows = store.naive_match(4).unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_ne!(row["id"], json!(100));
    assert_eq!(row["id"], json!(element_id("[2,4,6,8]", 1)));
    assert_eq!(row["key"], json!(1));
    assert_eq!(row["value"], json!(4));
    assert_eq!(row["entries"], json!("[2,4,6,8]"));
    assert!(row.get("rowid").is_none());
}

#[test]
fn naive_select_star_carries_two_id_columns() {
    let store = store_with(&[(100, &[2, 4, 6, 8])]);
    let out = store.query_pass(LookupKind::Naive, 4).unwrap();
    let ids: Vec<usize> = out
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.as_str() == "id")
        .map(|(i, _)| i)
        .collect();
    assert_eq!(ids.len(), 2);
    assert_eq!(out.shadowed_columns(), ["id"]);
    // positional access still sees both
    assert_eq!(out.rows[0][ids[0]], json!(100));
    assert_eq!(out.rows[0][ids[1]], json!(element_id("[2,4,6,8]", 1)));
}

#[test]
fn naive_order_by_id_sorts_on_the_row_id() {
    // the element id of 4 is smaller in row 9 than in row 3
    let store = store_with(&[(9, &[4]), (3, &[1, 2, 4])]);
    let entries: Vec<_> = store
        .naive_match(4)
        .unwrap()
        .iter()
        .map(|r| r["entries"].clone())
        .collect();
    assert_eq!(entries, [json!("[1,2,4]"), json!("[4]")]);
}

#[test]
fn corrected_lookup_keeps_the_row_id_as_rowid() {
    let store = store_with(&[(100, &[2, 4, 6, 8])]);
    let rows = store.corrected_match(4).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["rowid"], json!(100));
    assert_eq!(rows[0]["key"], json!(1));
    // `id` is still shadowed
    assert_eq!(rows[0]["id"], json!(element_id("[2,4,6,8]", 1)));
}

#[test]
fn naive_lookup_returns_one_result_per_occurrence() {
    let store = store_with(&[(7, &[3, 3, 9])]);
    let rows = store.naive_match(3).unwrap();
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0]["id"], rows[1]["id"]);
}

#[test]
fn distinct_does_not_collapse_repeated_values() {
    let store = store_with(&[(7, &[3, 3, 9]), (8, &[1, 3])]);
    let rows = store.corrected_distinct_match(3).unwrap();
    let mut got: Vec<(Option<i64>, Option<i64>)> = rows
        .iter()
        .map(|r| (r["rowid"].as_i64(), r["key"].as_i64()))
        .collect();
    got.sort_unstable();
    assert_eq!(
        got,
        vec![
            (Some(7), Some(0)),
            (Some(7), Some(1)),
            (Some(8), Some(1)),
        ]
    );
}

#[test]
fn single_row_scenario() {
    let store = store_with(&[(1, &[5])]);
    let naive = store.naive_match(5).unwrap();
    assert_eq!(naive.len(), 1);
    assert_eq!(naive[0]["key"], json!(0));
    assert_eq!(naive[0]["id"], json!(element_id("[5]", 0)));

    let corrected = store.corrected_match(5).unwrap();
    assert_eq!(corrected.len(), 1);
    assert_eq!(corrected[0]["rowid"], json!(1));
}

#[test]
fn unmatched_value_returns_nothing() {
    let store = store_with(&[(1, &[5]), (2, &[1, 2])]);
    for kind in [
        LookupKind::Naive,
        LookupKind::Corrected,
        LookupKind::CorrectedDistinct,
    ] {
        assert!(store.run_pass(kind, 9).unwrap().is_empty(), "{kind:?}");
    }
}

#[test]
fn qualified_projection_decodes_matches() {
    let store = store_with(&[(100, &[2, 4, 6, 8]), (7, &[3, 3, 9])]);
    let hits = store.qualified_match(4).unwrap();
    assert_eq!(
        hits,
        vec![MatchedElement {
            row_id: 100,
            entries: Entries::new(vec![2, 4, 6, 8]).unwrap(),
            position: 1,
            element_id: element_id("[2,4,6,8]", 1),
            value: 4,
        }]
    );

    let repeated = store.qualified_match(3).unwrap();
    assert_eq!(repeated.len(), 2);
    assert!(repeated.iter().all(|m| m.row_id == 7));
    assert_eq!(repeated[0].position, 0);
    assert_eq!(repeated[1].position, 1);
}

#[test]
fn custom_projection_decodes_into_caller_type() {
    #[derive(Deserialize)]
    struct Hit {
        row_id: i64,
        element_id: i64,
    }

    let store = store_with(&[(42, &[1, 6])]);
    let projection = Projection::new()
        .column(Relation::Rows, "id", "row_id")
        .and_then(|p| p.column(Relation::Each, "id", "element_id"))
        .unwrap();
    let hits: Vec<Hit> = store.projected_match(&projection, 6).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].row_id, 42);
    assert_eq!(hits[0].element_id, element_id("[1,6]", 1));
}

#[test]
fn empty_projection_is_rejected_before_querying() {
    // no table: an empty select list must fail before any SQL runs
    let store = Store::open_in_memory(&StoreConfig::default()).unwrap();
    let res = store.projected_match::<serde_json::Value>(&Projection::new(), 4);
    assert!(matches!(res, Err(Error::EmptyProjection)));
}

#[test]
fn exact_and_pattern_agree_on_integer_arrays() {
    let pattern = store_with(&[(1, &[1, 10]), (2, &[4, 10])]);
    let exact = Store::open_in_memory(&StoreConfig::default().set_value_match(ValueMatch::Exact))
        .unwrap();
    exact.create_schema().unwrap();
    for row in pattern.rows().unwrap() {
        exact.insert_row(&row).unwrap();
    }
    for value in 1..=10 {
        let a = pattern.corrected_match(value).unwrap();
        let b = exact.corrected_match(value).unwrap();
        assert_eq!(a, b, "value {value}");
    }
    // '1' does not match 10
    assert_eq!(pattern.corrected_match(1).unwrap().len(), 1);
}

#[test]
fn duplicate_id_is_an_insert_error() {
    let store = store_with(&[(1, &[5])]);
    let err = store
        .insert_row(&Row {
            id: 1,
            entries: Entries::new(vec![6]).unwrap(),
        })
        .unwrap_err();
    match err {
        Error::Insert { code, ref info } => {
            assert_eq!(code, rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY);
            assert!(info.contains("UNIQUE"), "{info}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn missing_table_is_a_query_error() {
    let store = Store::open_in_memory(&StoreConfig::default()).unwrap();
    assert!(matches!(store.naive_match(1), Err(Error::Query { .. })));
    assert!(matches!(store.direct(1), Err(Error::Query { .. })));
}

#[test]
fn invalid_table_name_is_rejected_on_open() {
    let cfg = StoreConfig::default().set_table("x; DROP TABLE y");
    assert!(matches!(
        Store::open_in_memory(&cfg),
        Err(Error::InvalidIdentifier(_))
    ));
}
