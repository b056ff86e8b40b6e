use super::*;
use mwbkit_php::Literal;
use mwbkit_schema::{Column, Document, Index, IndexColumn, Table};
use proptest::prelude::*;

fn col(name: &str, ty: &str) -> Column {
    Column {
        id: format!("c.{name}"),
        name: name.to_string(),
        simple_type: format!("com.mysql.rdbms.mysql.datatype.{ty}"),
        is_not_null: true,
        ..Column::default()
    }
}

fn unsigned(column: Column) -> Column {
    Column {
        flags: vec!["UNSIGNED".to_string()],
        ..column
    }
}

fn auto_increment(column: Column) -> Column {
    Column {
        auto_increment: true,
        ..column
    }
}

fn index(name: &str, kind: &str, columns: &[&str]) -> Index {
    Index {
        id: format!("i.{name}"),
        name: name.to_string(),
        index_type: kind.to_string(),
        columns: columns
            .iter()
            .map(|c| IndexColumn {
                referenced_column: format!("c.{c}"),
                ..IndexColumn::default()
            })
            .collect(),
        ..Index::default()
    }
}

fn table(name: &str, columns: Vec<Column>, indices: Vec<Index>) -> Table {
    Table {
        id: format!("t.{name}"),
        name: name.to_string(),
        columns,
        indices,
        default_character_set_name: "utf8mb4".to_string(),
        default_collation_name: "utf8mb4_general_ci".to_string(),
        ..Table::default()
    }
}

/// Emit a single column statement, as it would appear inside a table.
fn emit_in(table: &Table, column: &Column) -> String {
    let mut migration = Migration::new();
    migration.add_column(table, column).unwrap();
    migration.into_contents().trim_start().to_string()
}

fn emit(column: Column) -> String {
    let t = table("t", vec![column.clone()], vec![]);
    emit_in(&t, &column)
}

#[test]
fn test_big_increments_becomes_id() {
    assert_eq!(emit(unsigned(auto_increment(col("id", "bigint")))), "$table->id();");
    assert_eq!(
        emit(unsigned(auto_increment(col("user_id", "bigint")))),
        r#"$table->id("user_id");"#
    );
}

#[test]
fn test_increments_family() {
    assert_eq!(
        emit(unsigned(auto_increment(col("id", "int")))),
        r#"$table->increments("id");"#
    );
    assert_eq!(
        emit(unsigned(auto_increment(col("id", "tinyint")))),
        r#"$table->tinyIncrements("id");"#
    );
    assert_eq!(
        emit(unsigned(auto_increment(col("id", "mediumint")))),
        r#"$table->mediumIncrements("id");"#
    );
}

#[test]
fn test_unsigned_integers() {
    assert_eq!(
        emit(unsigned(col("count", "int"))),
        r#"$table->unsignedInteger("count");"#
    );
    assert_eq!(
        emit(unsigned(col("level", "smallint"))),
        r#"$table->unsignedSmallInteger("level");"#
    );
    assert_eq!(
        emit(unsigned(col("user_id", "bigint"))),
        r#"$table->foreignId("user_id");"#
    );
    // Only big unsigned integers become foreign ids.
    assert_eq!(
        emit(unsigned(col("user_id", "int"))),
        r#"$table->unsignedInteger("user_id");"#
    );
    assert_eq!(
        emit(unsigned(col("views", "bigint"))),
        r#"$table->unsignedBigInteger("views");"#
    );
}

#[test]
fn test_signed_integers() {
    assert_eq!(emit(col("n", "int")), r#"$table->integer("n");"#);
    assert_eq!(emit(col("n", "tinyint")), r#"$table->tinyInteger("n");"#);
    assert_eq!(emit(col("n", "bigint")), r#"$table->bigInteger("n");"#);
    insta::assert_snapshot!(emit(auto_increment(col("seq", "bigint"))), @r#"
    $table->bigInteger("seq")
        ->autoIncrement();
    "#);
}

#[test]
fn test_decimals() {
    let decimal = |precision, scale| Column {
        precision,
        scale,
        ..col("x", "decimal")
    };
    assert_eq!(emit(decimal(8, 2)), r#"$table->decimal("x");"#);
    assert_eq!(emit(decimal(10, 2)), r#"$table->decimal("x", 10);"#);
    assert_eq!(emit(decimal(10, 4)), r#"$table->decimal("x", 10, 4);"#);
    assert_eq!(emit(decimal(-1, -1)), r#"$table->decimal("x", 10, 0);"#);
    assert_eq!(emit(decimal(12, -1)), r#"$table->decimal("x", 12, 0);"#);
    assert_eq!(
        emit(unsigned(decimal(8, 2))),
        r#"$table->unsignedDecimal("x");"#
    );
    assert_eq!(emit(col("ratio", "real")), r#"$table->double("ratio");"#);
    assert_eq!(emit(col("ratio", "float")), r#"$table->float("ratio");"#);
    assert_eq!(
        emit(unsigned(col("ratio", "double"))),
        r#"$table->unsignedDouble("ratio");"#
    );
}

#[test]
fn test_unspecified_decimal_keeps_mysql_defaults() {
    // DECIMAL(10) is DECIMAL(10,0); Laravel's scale of 2 would change it.
    let amount = Column {
        precision: 10,
        ..col("amount", "decimal")
    };
    assert_eq!(emit(amount.clone()), r#"$table->decimal("amount", 10, 0);"#);
    assert_eq!(
        emit(unsigned(amount)),
        r#"$table->unsignedDecimal("amount", 10, 0);"#
    );
    assert_eq!(emit(col("amount", "decimal")), r#"$table->decimal("amount", 10, 0);"#);

    // Floating types have no fixed MySQL default and keep Laravel's.
    assert_eq!(emit(col("x", "float")), r#"$table->float("x");"#);
    let ratio = Column {
        precision: 12,
        ..col("ratio", "double")
    };
    assert_eq!(emit(ratio), r#"$table->double("ratio", 12);"#);
}

#[test]
fn test_strings() {
    let sized = |name, ty, length| Column {
        length,
        ..col(name, ty)
    };
    assert_eq!(emit(sized("token", "char", 36)), r#"$table->uuid("token");"#);
    assert_eq!(emit(sized("name", "varchar", 255)), r#"$table->string("name");"#);
    assert_eq!(
        emit(sized("name", "varchar", 100)),
        r#"$table->string("name", 100);"#
    );
    assert_eq!(emit(sized("code", "char", 2)), r#"$table->char("code", 2);"#);
    assert_eq!(emit(sized("code", "nchar", 36)), r#"$table->char("code", 36);"#);
    assert_eq!(
        emit(sized("title", "nvarchar", 80)),
        r#"$table->string("title", 80);"#
    );
    assert_eq!(emit(col("title", "varchar")), r#"$table->string("title");"#);
}

#[test]
fn test_times() {
    assert_eq!(emit(col("at", "timestamp")), r#"$table->timestamp("at");"#);
    assert_eq!(emit(col("on", "date")), r#"$table->date("on");"#);
    assert_eq!(
        emit(Column {
            length: 6,
            ..col("at", "datetime_f")
        }),
        r#"$table->datetime("at", 6);"#
    );
    assert_eq!(
        emit(Column {
            precision: 3,
            length: 6,
            ..col("at", "time_f")
        }),
        r#"$table->time("at", 3);"#
    );
    assert_eq!(
        emit(Column {
            precision: 0,
            ..col("at", "timestamp_f")
        }),
        r#"$table->timestamp("at");"#
    );
}

#[test]
fn test_enumerated() {
    let size = Column {
        datatype_explicit_params: "('small','medium','large')".to_string(),
        ..col("size", "enum")
    };
    assert_eq!(
        emit(size),
        r#"$table->enum("size", ["small", "medium", "large"]);"#
    );
    let tags = Column {
        datatype_explicit_params: "('a$b')".to_string(),
        ..col("tags", "set")
    };
    assert_eq!(emit(tags), r#"$table->set("tags", ["a\$b"]);"#);
}

#[test]
fn test_residual_types() {
    assert_eq!(emit(col("doc", "json")), r#"$table->json("doc");"#);
    assert_eq!(emit(col("body", "mediumtext")), r#"$table->mediumText("body");"#);
    assert_eq!(emit(col("data", "varbinary")), r#"$table->blob("data");"#);
    assert_eq!(emit(col("path", "linestring")), r#"$table->lineString("path");"#);
    assert_eq!(emit(col("flag", "boolean")), r#"$table->boolean("flag");"#);
}

#[test]
fn test_bit_is_unsupported() {
    let t = table("t", vec![], vec![]);
    let err = translate_column(&t, &col("mask", "bit")).unwrap_err();
    match &err {
        TranslateError::UnsupportedType { type_name, column } => {
            assert_eq!(type_name, "bit");
            assert_eq!(column, "mask");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), "unsupported type `bit` on column `mask`");
}

#[test]
fn test_nullable_and_default() {
    let count = Column {
        is_not_null: false,
        default_value: "0".to_string(),
        ..col("count", "int")
    };
    insta::assert_snapshot!(emit(count), @r#"
    $table->integer("count")
        ->nullable()
        ->default(0);
    "#);

    let null_default = Column {
        is_not_null: false,
        default_value: "NULL".to_string(),
        default_value_is_null: true,
        ..col("note", "text")
    };
    insta::assert_snapshot!(emit(null_default), @r#"
    $table->text("note")
        ->nullable();
    "#);
}

#[test]
fn test_comment_is_escaped() {
    let price = Column {
        comment: r#"cost in "$" {net}"#.to_string(),
        ..col("price", "int")
    };
    insta::assert_snapshot!(emit(price), @r#"
    $table->integer("price")
        ->comment("cost in \"\$\" \{net\}");
    "#);
}

#[test]
fn test_charset_and_collation_differ_from_table() {
    let same = Column {
        character_set_name: "utf8mb4".to_string(),
        collation_name: "utf8mb4_general_ci".to_string(),
        ..col("name", "varchar")
    };
    assert_eq!(emit(same), r#"$table->string("name");"#);

    let other = Column {
        character_set_name: "latin1".to_string(),
        collation_name: "latin1_bin".to_string(),
        ..col("name", "varchar")
    };
    insta::assert_snapshot!(emit(other), @r#"
    $table->string("name")
        ->charset("latin1")
        ->collation("latin1_bin");
    "#);
}

#[test]
fn test_from_uses_next_auto_increment() {
    let id = unsigned(auto_increment(col("id", "int")));
    let mut t = table("t", vec![id.clone()], vec![]);
    t.next_auto_inc = "1000".to_string();
    insta::assert_snapshot!(emit_in(&t, &id), @r#"
    $table->increments("id")
        ->from(1000);
    "#);

    t.next_auto_inc = "soon".to_string();
    assert_eq!(emit_in(&t, &id), r#"$table->increments("id");"#);
}

#[test]
fn test_generated_columns() {
    let stored = Column {
        generated: true,
        generated_storage: "stored".to_string(),
        expression: "price * qty".to_string(),
        ..col("total", "int")
    };
    insta::assert_snapshot!(emit(stored), @r#"
    $table->integer("total")
        ->storedAs("price * qty");
    "#);

    let virtual_ = Column {
        generated: true,
        generated_storage: "VIRTUAL".to_string(),
        expression: "upper(name)".to_string(),
        ..col("shout", "varchar")
    };
    insta::assert_snapshot!(emit(virtual_), @r#"
    $table->string("shout")
        ->virtualAs("upper(name)");
    "#);
}

#[test]
fn test_single_column_index_modifiers() {
    let email = col("email", "varchar");
    let code = col("code", "char");
    let t = table(
        "t",
        vec![email.clone(), code.clone()],
        vec![
            index("email_unique", "UNIQUE", &["email"]),
            index("", "INDEX", &["email"]),
            index("PRIMARY", "PRIMARY", &["code"]),
        ],
    );
    insta::assert_snapshot!(emit_in(&t, &email), @r#"
    $table->string("email")
        ->index()
        ->unique("email_unique");
    "#);
    insta::assert_snapshot!(emit_in(&t, &code), @r#"
    $table->char("code")
        ->primary();
    "#);
}

#[test]
fn test_primary_skipped_for_incrementing_key() {
    let id = unsigned(auto_increment(col("id", "bigint")));
    let t = table(
        "t",
        vec![id.clone()],
        vec![index("PRIMARY", "PRIMARY", &["id"])],
    );
    assert_eq!(emit_in(&t, &id), "$table->id();");

    let seq = auto_increment(col("seq", "int"));
    let t = table(
        "t",
        vec![seq.clone()],
        vec![index("PRIMARY", "PRIMARY", &["seq"])],
    );
    insta::assert_snapshot!(emit_in(&t, &seq), @r#"
    $table->integer("seq")
        ->autoIncrement()
        ->primary();
    "#);
}

#[test]
fn test_full_modifier_chain_order() {
    let c = Column {
        is_not_null: false,
        default_value: "1".to_string(),
        comment: "c".to_string(),
        collation_name: "utf8mb4_bin".to_string(),
        ..auto_increment(col("n", "int"))
    };
    let mut t = table(
        "t",
        vec![c.clone()],
        vec![
            index("n_ft", "FULLTEXT", &["n"]),
            index("n_sp", "SPATIAL", &["n"]),
            index("n_idx", "INDEX", &["n"]),
        ],
    );
    t.next_auto_inc = "5".to_string();

    let mut migration = Migration::new();
    migration.change_column(&t, &c).unwrap();
    insta::assert_snapshot!(migration.contents().trim_start(), @r#"
    $table->integer("n")
        ->autoIncrement()
        ->from(5)
        ->nullable()
        ->default(1)
        ->index("n_idx")
        ->fulltext("n_ft")
        ->spatialIndex("n_sp")
        ->collation("utf8mb4_bin")
        ->comment("c")
        ->change();
    "#);
}

#[test]
fn test_translate_index() {
    let t = table(
        "t",
        vec![col("a", "int"), col("b", "int")],
        vec![],
    );
    let desc = translate_index(&t, &index("ab", "UNIQUE", &["a", "gone", "b"])).unwrap();
    assert_eq!(desc.method, "unique");
    assert_eq!(desc.columns, vec!["a", "b"]);

    let desc = translate_index(&t, &index("ft", "FULLTEXT", &["a", "b"])).unwrap();
    assert_eq!(desc.method, "fullText");

    let err = translate_index(&t, &index("weird", "CLUSTERED", &["a", "b"])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid index type `CLUSTERED` on index `weird`"
    );
}

#[test]
fn test_index_method() {
    use mwbkit_schema::IndexKind;
    assert_eq!(index_method(IndexKind::Fulltext, false), "fulltext");
    assert_eq!(index_method(IndexKind::Fulltext, true), "fullText");
    assert_eq!(index_method(IndexKind::Spatial, true), "spatialIndex");
    assert_eq!(index_method(IndexKind::Primary, false), "primary");
}

#[test]
fn test_render_index() {
    let t = table("t", vec![col("a", "int"), col("b", "int")], vec![]);
    assert_eq!(
        render_index(&t, &index("ab", "INDEX", &["a", "b"])).unwrap(),
        r#"$table->index(["a", "b"]);"#
    );
}

fn users() -> Table {
    let created_at = Column {
        is_not_null: false,
        ..col("created_at", "timestamp")
    };
    let name = Column {
        length: 255,
        ..col("name", "varchar")
    };
    table(
        "users",
        vec![
            unsigned(auto_increment(col("id", "bigint"))),
            name,
            created_at,
        ],
        vec![
            index("PRIMARY", "PRIMARY", &["id"]),
            index("name_created", "INDEX", &["name", "created_at"]),
        ],
    )
}

#[test]
fn test_create_users_table() {
    insta::assert_snapshot!(render_table(&users(), 4).unwrap(), @r#"
    Schema::create('users', function (Blueprint $table) {
        $table->id();
        $table->string("name");
        $table->timestamp("created_at")
            ->nullable();
        $table->index(["name", "created_at"]);
    });
    "#);
}

#[test]
fn test_create_table_indent_width() {
    let t = table("it's", vec![col("n", "int")], vec![]);
    assert_eq!(
        render_table(&t, 2).unwrap(),
        "Schema::create('it\\'s', function (Blueprint $table) {\n  $table->integer(\"n\");\n});"
    );
}

#[test]
fn test_failed_table_writes_nothing() {
    let t = table("t", vec![col("a", "int"), col("mask", "bit")], vec![]);
    let mut migration = Migration::new();
    assert!(migration.create_table(&t).is_err());
    assert_eq!(migration.contents(), "");
}

#[test]
fn test_drop_table() {
    let mut migration = Migration::new();
    migration.drop_table(&users());
    assert_eq!(migration.contents(), "\nSchema::drop('users');");
}

fn document(tables: Vec<Table>) -> Document {
    let mut doc = Document::default();
    doc.physical_models.push(mwbkit_schema::Model {
        catalog: Some(mwbkit_schema::Catalog {
            schemata: vec![mwbkit_schema::Schema {
                tables,
                ..Default::default()
            }],
            ..Default::default()
        }),
        ..Default::default()
    });
    doc
}

#[test]
fn test_created_tables() {
    let posts = table("posts", vec![], vec![]);
    let prev = document(vec![users()]);
    let new = document(vec![users(), posts]);

    let names = |tables: Vec<&Table>| -> Vec<String> {
        tables.iter().map(|t| t.name.clone()).collect()
    };
    assert_eq!(names(created_tables(&new, Some(&prev))), vec!["posts"]);
    assert_eq!(names(created_tables(&new, None)), vec!["users", "posts"]);
    assert!(created_tables(&prev, Some(&prev)).is_empty());

    // Renaming keeps the id, so the table is not new.
    let mut renamed = users();
    renamed.name = "members".to_string();
    let new = document(vec![renamed]);
    assert!(created_tables(&new, Some(&prev)).is_empty());
}

#[test]
fn test_dropped_tables() {
    let posts = table("posts", vec![], vec![]);
    let prev = document(vec![users(), posts]);
    let new = document(vec![users()]);

    let dropped: Vec<_> = dropped_tables(&new, Some(&prev))
        .iter()
        .map(|t| t.name.clone())
        .collect();
    assert_eq!(dropped, vec!["posts"]);
    assert!(dropped_tables(&new, None).is_empty());
    assert!(dropped_tables(&prev, Some(&prev)).is_empty());

    // A renamed table keeps its id and is not dropped.
    let mut renamed = users();
    renamed.name = "members".to_string();
    let new = document(vec![renamed]);
    let prev = document(vec![users()]);
    assert!(dropped_tables(&new, Some(&prev)).is_empty());
}

#[test]
fn test_renamed_tables() {
    let prev = document(vec![users(), table("posts", vec![], vec![])]);
    let mut members = users();
    members.name = "members".to_string();
    let comments = table("comments", vec![], vec![]);
    let new = document(vec![members, table("posts", vec![], vec![]), comments]);

    let renamed = renamed_tables(&new, Some(&prev));
    assert_eq!(renamed.len(), 1);
    assert_eq!(renamed[0].name, "members");
    assert_eq!(renamed[0].id, "t.users");

    assert!(renamed_tables(&new, None).is_empty());
    assert!(renamed_tables(&prev, Some(&prev)).is_empty());
}

#[test]
fn test_modifier_overwrite() {
    let mut desc = ColumnDescriptor::new("integer", vec![Literal::from("n")]);
    desc.set_modifier(ModifierKind::Default, vec![Literal::raw("1")]);
    desc.set_modifier(ModifierKind::Default, vec![Literal::raw("2")]);
    assert_eq!(
        desc.modifier(ModifierKind::Default),
        Some(&[Literal::raw("2")][..])
    );
    assert_eq!(desc.modifiers().count(), 1);
    assert!(desc.remove_modifier(ModifierKind::Default).is_some());
    assert!(!desc.has_modifier(ModifierKind::Default));
}

proptest! {
    #[test]
    fn modifiers_come_out_in_priority_order(
        kinds in Just(ModifierKind::ALL.to_vec()).prop_shuffle(),
        take in 0..=ModifierKind::ALL.len(),
    ) {
        let mut desc = ColumnDescriptor::new("integer", vec![Literal::from("n")]);
        for kind in &kinds[..take] {
            desc.set_modifier(*kind, vec![]);
        }

        let emitted: Vec<_> = desc.modifiers().map(|(kind, _)| kind).collect();
        let mut expected = kinds[..take].to_vec();
        expected.sort();
        prop_assert_eq!(&emitted, &expected);

        let positions: Vec<_> = emitted
            .iter()
            .map(|kind| ModifierKind::ALL.iter().position(|k| k == kind).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
