// Registration and route derivation over whole manifests.
mod support;

use congress_api::{
    build_collection_route, build_search_route, is_magic, Bootstrap, ApiConfig, ModelManifest, ModelRegistry,
    RegistrationError, RouteTable, RouteTarget, StartupError, MAGIC_FIELDS,
};
use support::{congress_manifest, Fixture};

#[test]
fn bill_and_legislator_routes() {
    let registry = ModelRegistry::discover_and_register(&congress_manifest()).unwrap();
    let names: Vec<_> = registry.models().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Bill", "Legislator"]);

    let collection = build_collection_route(registry.queryable_models());
    assert!(collection.is_match("/bills"));
    assert!(collection.is_match("/legislators"));
    assert!(!collection.is_match("/bill"));
    assert!(!collection.is_match("/legislators/1"));

    let search = build_search_route(registry.searchable_models());
    assert!(search.is_match("/search/bills"));
    assert!(!search.is_match("/search/legislators"));
    assert!(!search.is_match("/search/"));
    assert!(!search.is_match("/search/bills,legislators"));
}

#[test]
fn reserved_field_fails_whole_registration() {
    let manifest = congress_manifest().register(Fixture::new("Vote").fields(&["roll_id", "page"]).queryable());
    let result = ModelRegistry::discover_and_register(&manifest);
    assert_eq!(
        result.unwrap_err(),
        RegistrationError::ReservedFieldCollision {
            model: "Vote".into(),
            field: "page".into(),
        }
    );

    // the bootstrap path refuses to produce any state either
    let err = Bootstrap::prepare(ApiConfig::default(), &manifest).unwrap_err();
    assert!(matches!(
        err,
        StartupError::Registration(RegistrationError::ReservedFieldCollision { .. })
    ));
}

#[test]
fn every_magic_name_is_rejected_as_a_field() {
    for name in MAGIC_FIELDS {
        let fields: &'static [&'static str] = Box::leak(vec![name].into_boxed_slice());
        let manifest = ModelManifest::new().register(Fixture::new("Amendment").fields(fields));
        match ModelRegistry::discover_and_register(&manifest) {
            Err(RegistrationError::ReservedFieldCollision { model, field }) => {
                assert_eq!(model, "Amendment");
                assert_eq!(field, name);
            }
            other => panic!("{name}: expected collision, got {other:?}"),
        }
    }
    assert!(!is_magic("pages"));
}

#[test]
fn slugs_are_unique_per_capability() {
    let manifest = ModelManifest::new()
        .register(Fixture::new("Bill").queryable())
        .register(Fixture::new("BillArchive").slug("bills").queryable());
    assert_eq!(
        ModelRegistry::discover_and_register(&manifest).unwrap_err(),
        RegistrationError::DuplicateSlug("bills".into(), "Bill".into(), "BillArchive".into())
    );

    let manifest = ModelManifest::new()
        .register(Fixture::new("Bill").searchable())
        .register(Fixture::new("BillText").slug("bills").searchable());
    assert!(matches!(
        ModelRegistry::discover_and_register(&manifest),
        Err(RegistrationError::DuplicateSlug(..))
    ));

    // one queryable and one searchable model may share a slug
    let manifest = ModelManifest::new()
        .register(Fixture::new("Bill").queryable())
        .register(Fixture::new("BillText").slug("bills").searchable());
    let registry = ModelRegistry::discover_and_register(&manifest).unwrap();
    assert_eq!(registry.queryable_by_slug("bills").unwrap().name, "Bill");
    assert_eq!(registry.searchable_by_slug("bills").unwrap().name, "BillText");
}

#[test]
fn route_building_is_deterministic() {
    let paths = [
        "/bills",
        "/legislators",
        "/votes",
        "/search/bills",
        "/search/bills,bills",
        "/search/legislators",
        "/",
        "",
        "/search/",
        "/bills/",
    ];
    let first = ModelRegistry::discover_and_register(&congress_manifest()).unwrap();
    let second = ModelRegistry::discover_and_register(&congress_manifest()).unwrap();
    let tables = [
        RouteTable::from_registry(&first),
        RouteTable::from_registry(&first),
        RouteTable::from_registry(&second),
    ];
    for path in paths {
        let outcomes: Vec<_> = tables.iter().map(|t| t.resolve(path)).collect();
        assert!(outcomes.windows(2).all(|w| w[0] == w[1]), "{path:?} resolved differently");
    }
    assert_eq!(tables[0].collection.slugs(), tables[2].collection.slugs());
}

#[test]
fn resolve_prefers_collection_then_search() {
    let registry = ModelRegistry::discover_and_register(&congress_manifest()).unwrap();
    let table = RouteTable::from_registry(&registry);
    assert_eq!(table.resolve("/bills"), Some(RouteTarget::Collection("bills".into())));
    assert_eq!(
        table.resolve("/search/bills,bills"),
        Some(RouteTarget::Search(vec!["bills".into(), "bills".into()]))
    );
    assert_eq!(table.resolve("/search"), None);
}

#[test]
fn no_models_means_no_data_routes() {
    let registry = ModelRegistry::discover_and_register(&ModelManifest::new()).unwrap();
    assert!(registry.is_empty());
    let table = RouteTable::from_registry(&registry);
    for path in ["/", "/bills", "/search/", "/search/bills", "/search/,"] {
        assert_eq!(table.resolve(path), None);
    }
}
