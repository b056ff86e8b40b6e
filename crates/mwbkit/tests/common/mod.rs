#![allow(dead_code)]

use mwbkit::Element;

/// Route `tracing` output to the test harness; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn column(id: &str, name: &str, ty: &str, members: Vec<Element>) -> Element {
    Element::object("db.mysql.Column")
        .with_id(id)
        .with_children([
            Element::string(name).keyed("name"),
            Element::link(format!("com.mysql.rdbms.mysql.datatype.{ty}")).keyed("simpleType"),
        ])
        .with_children(members)
}

pub fn unsigned() -> Element {
    Element::list()
        .keyed("flags")
        .with_child(Element::string("UNSIGNED"))
}

pub fn index(id: &str, name: &str, kind: &str, columns: &[&str]) -> Element {
    Element::object("db.mysql.Index").with_id(id).with_children([
        Element::string(name).keyed("name"),
        Element::string(kind).keyed("indexType"),
        Element::list()
            .keyed("columns")
            .with_children(columns.iter().map(|col| {
                Element::object("db.mysql.IndexColumn")
                    .with_child(Element::link(*col).keyed("referencedColumn"))
            })),
    ])
}

pub fn table(id: &str, name: &str, columns: Vec<Element>, indices: Vec<Element>) -> Element {
    Element::object("db.mysql.Table").with_id(id).with_children([
        Element::string(name).keyed("name"),
        Element::list().keyed("columns").with_children(columns),
        Element::list().keyed("indices").with_children(indices),
    ])
}

/// A complete Workbench document around `tables`.
pub fn document(tables: Vec<Element>) -> Element {
    let schema = Element::object("db.mysql.Schema")
        .with_id("schema")
        .with_children([
            Element::string("app").keyed("name"),
            Element::list().keyed("tables").with_children(tables),
        ]);
    let catalog = Element::object("db.mysql.Catalog")
        .with_id("catalog")
        .keyed("catalog")
        .with_child(Element::list().keyed("schemata").with_child(schema));
    let model = Element::object("workbench.physical.Model")
        .with_id("model")
        .with_child(catalog);
    Element::new("document").with_child(Element::data([Element::object("workbench.Document")
        .with_id("doc")
        .with_child(
            Element::list()
                .keyed("physicalModels")
                .with_child(model),
        )]))
}

pub fn users_table() -> Element {
    table(
        "t.users",
        "users",
        vec![
            column(
                "c.users.id",
                "id",
                "bigint",
                vec![
                    unsigned(),
                    Element::int(1).keyed("autoIncrement"),
                    Element::int(1).keyed("isNotNull"),
                ],
            ),
            column(
                "c.users.name",
                "name",
                "varchar",
                vec![
                    Element::int(255).keyed("length"),
                    Element::int(1).keyed("isNotNull"),
                ],
            ),
            column(
                "c.users.created_at",
                "created_at",
                "timestamp",
                vec![Element::int(0).keyed("isNotNull")],
            ),
        ],
        vec![index("i.users.primary", "PRIMARY", "PRIMARY", &["c.users.id"])],
    )
}

pub fn posts_table() -> Element {
    table(
        "t.posts",
        "posts",
        vec![
            column(
                "c.posts.id",
                "id",
                "bigint",
                vec![
                    unsigned(),
                    Element::int(1).keyed("autoIncrement"),
                    Element::int(1).keyed("isNotNull"),
                ],
            ),
            column(
                "c.posts.user_id",
                "user_id",
                "bigint",
                vec![unsigned(), Element::int(1).keyed("isNotNull")],
            ),
            column(
                "c.posts.slug",
                "slug",
                "varchar",
                vec![
                    Element::int(120).keyed("length"),
                    Element::int(1).keyed("isNotNull"),
                ],
            ),
            column(
                "c.posts.status",
                "status",
                "enum",
                vec![
                    Element::string("('draft','published')").keyed("datatypeExplicitParams"),
                    Element::string("'draft'").keyed("defaultValue"),
                    Element::int(1).keyed("isNotNull"),
                ],
            ),
        ],
        vec![
            index("i.posts.primary", "PRIMARY", "PRIMARY", &["c.posts.id"]),
            index("i.posts.slug", "posts_slug_unique", "UNIQUE", &["c.posts.slug"]),
            index(
                "i.posts.user_status",
                "posts_user_status",
                "INDEX",
                &["c.posts.user_id", "c.posts.status"],
            ),
        ],
    )
}
