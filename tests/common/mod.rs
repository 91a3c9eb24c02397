//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use docxref::model::{Document, Entity, Reference};

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Two packages that both define `Foo`, with links between them.
///
/// - `com.example.v1.Foo` owns `bar(java.lang.String)` and `baz()`
/// - `com.example.v1beta.Foo` links back to v1 and to an unknown class
#[allow(dead_code)]
pub fn versioned_documents() -> Vec<Document> {
    let v1 = Document::new("com.example.v1.Foo", "com.example.v1")
        .with_entity(Entity::new("com.example.v1.Foo", "Foo", "Foo").owner())
        .with_entity(
            Entity::new(
                "com.example.v1.Foo.bar(java.lang.String)",
                "bar(String)",
                "Foo.bar(String value)",
            )
            .with_summary(
                r##"Calls <link uid="#baz()">baz</link> on <link uid="Foo">this Foo</link>, see [baz](#baz())."##,
            ),
        )
        .with_entity(Entity::new("com.example.v1.Foo.baz()", "baz()", "Foo.baz()"))
        .with_reference(
            Reference::new("java.lang.String", "String").with_name_with_type("String"),
        );

    let v1beta = Document::new("com.example.v1beta.Foo", "com.example.v1beta")
        .with_entity(
            Entity::new("com.example.v1beta.Foo", "Foo", "Foo")
                .owner()
                .with_summary(concat!(
                    r#"Successor of <link uid="com.example.v1.Foo">v1</link>, "#,
                    r#"see <link uid="Foo#bar(String)">bar</link>, "#,
                    r#"<link uid="java.lang.String#format(String, Object...)">format</link> "#,
                    r#"and <link uid="UnknownClass">nothing</link>."#,
                )),
        )
        .with_reference(
            Reference::new("java.lang.String", "String").with_name_with_type("String"),
        );

    vec![v1, v1beta]
}

/// A document whose owner is addressed as `a.b.OwnerClass`.
#[allow(dead_code)]
pub fn owner_document() -> Document {
    Document::new("a.b.OwnerClass", "a.b")
        .with_entity(Entity::new("a.b.OwnerClass", "OwnerClass", "a.b.OwnerClass").owner())
        .with_entity(
            Entity::new(
                "a.b.OwnerClass.someMethod2(String p1, String p2)",
                "someMethod2(String p1, String p2)",
                "OwnerClass.someMethod2(String p1, String p2)",
            )
            .with_summary(
                r##"Overload of <link uid="#someMethod2(String p1, String p2)">someMethod2</link>."##,
            ),
        )
}

/// A document mentioning a nested generic type next to one of its fragments.
#[allow(dead_code)]
pub fn generic_document() -> Document {
    Document::new("df.mn.ClassOne", "df.mn")
        .with_entity(Entity::new("df.mn.ClassOne", "ClassOne<T>", "ClassOne<T>").owner())
        .with_entity(
            Entity::new(
                "df.mn.ClassOne.wrap()",
                "wrap()",
                "ClassOne<T>.wrap()",
            )
            .with_summary(r#"Wraps into a <link uid="List">list</link> of <link uid="T">T</link>."#),
        )
        .with_reference(Reference::new(
            "a.b.c.List<df.mn.ClassOne<tr.T>>",
            "List<ClassOne<T>>",
        ))
}
