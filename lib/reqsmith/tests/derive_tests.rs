//! Integration tests for `#[derive(QuerySource)]`.

#![allow(missing_docs)]

use assert2::check;
use reqsmith::{Factory, Method, QuerySource};

#[derive(QuerySource)]
struct Paging {
    #[query(name = "page")]
    page: u32,
    #[query(name = "page_size")]
    page_size: u32,
}

#[derive(QuerySource)]
struct Search {
    #[query(name = "q")]
    term: String,
    #[query(name = "q")]
    alternate: String,
    #[query(flatten)]
    window: Paging,
    #[allow(dead_code)]
    session_token: String,
}

#[test]
fn tagged_fields_harvest_in_traversal_order() {
    let search = Search {
        term: "rust".to_string(),
        alternate: "http".to_string(),
        window: Paging {
            page: 2,
            page_size: 50,
        },
        session_token: "secret".to_string(),
    };

    check!(
        search.query_pairs()
            == vec![
                ("q".to_string(), "rust".to_string()),
                ("q".to_string(), "http".to_string()),
                ("page".to_string(), "2".to_string()),
                ("page_size".to_string(), "50".to_string()),
            ]
    );
}

#[derive(QuerySource)]
struct Inner {
    #[query(name = "x")]
    third: String,
}

#[derive(QuerySource)]
struct CollidingTags {
    #[query(name = "x")]
    first: String,
    #[query(name = "x")]
    second: String,
    #[query(flatten)]
    nested: Inner,
}

#[test]
fn colliding_tags_concatenate_across_nesting() {
    let source = CollidingTags {
        first: "v1".to_string(),
        second: "v2".to_string(),
        nested: Inner {
            third: "v3".to_string(),
        },
    };

    let factory =
        Factory::new(Method::Get, "http://h/").query_parameters_from(&source);
    check!(
        factory.query_params().get("x")
            == Some(["v1".to_string(), "v2".into(), "v3".into()].as_slice())
    );
}

#[derive(QuerySource)]
struct OptionalAndRepeated {
    #[query(name = "page")]
    page: Option<u32>,
    #[query(name = "tag")]
    tags: Vec<String>,
}

#[test]
fn optional_fields_skip_none() {
    let source = OptionalAndRepeated {
        page: None,
        tags: vec![],
    };
    check!(source.query_pairs().is_empty());

    let source = OptionalAndRepeated {
        page: Some(3),
        tags: vec!["a".to_string(), "b".to_string()],
    };
    check!(
        source.query_pairs()
            == vec![
                ("page".to_string(), "3".to_string()),
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
            ]
    );
}

#[test]
fn extraction_appends_to_existing_parameters() {
    let source = OptionalAndRepeated {
        page: Some(1),
        tags: vec!["x".to_string()],
    };

    let factory = Factory::new(Method::Get, "http://h/")
        .query_parameter("tag", ["preexisting"])
        .query_parameters_from(&source);

    check!(
        factory.query_params().get("tag")
            == Some(["preexisting".to_string(), "x".into()].as_slice())
    );
}

#[test]
fn pairs_shortcut_bypasses_tag_walk() {
    let mut factory = Factory::new(Method::Get, "http://h/").query_parameters_from_pairs([
        ("a".to_string(), "1".to_string()),
        ("a".to_string(), "2".to_string()),
        ("b".to_string(), "3".to_string()),
    ]);

    let request = factory.make().expect("assemble");
    check!(request.url().query() == Some("a=1&a=2&b=3"));
}

#[test]
fn harvested_parameters_merge_into_assembled_url() {
    let search = Search {
        term: "rust".to_string(),
        alternate: "async".to_string(),
        window: Paging {
            page: 1,
            page_size: 10,
        },
        session_token: "secret".to_string(),
    };

    let request = Factory::new(Method::Get, "http://h/search")
        .query_parameters_from(&search)
        .make()
        .expect("assemble");

    check!(request.url().query() == Some("page=1&page_size=10&q=rust&q=async"));
}
