//! The two production paths emit the identical tree shape: statements built
//! fluently compare equal to the same statements parsed from text.

mod common;
use common::*;

use arbor_sql_core::ast::{JoinKind, SortOrder};
use arbor_sql_core::builder::{
    cast, col, count_star, default_value, lit, param, qualified, Delete, Insert, Select, Update,
};

#[test]
fn select_with_where_matches() {
    let built = Select::new()
        .column(col("id"))
        .column(col("name"))
        .from("users")
        .where_clause(col("active").eq(lit(true)))
        .build();
    assert_eq!(
        built,
        parsed("SELECT id, name FROM users WHERE active = TRUE")
    );
}

#[test]
fn distinct_and_alias_match() {
    let built = Select::new()
        .distinct()
        .column_as(count_star(), "cnt")
        .from("orders")
        .build();
    assert_eq!(built, parsed("SELECT DISTINCT COUNT(*) AS cnt FROM orders"));
}

#[test]
fn nested_condition_matches() {
    let built = Select::new()
        .column(col("a"))
        .from("t")
        .where_clause(
            col("a")
                .eq(lit(1))
                .and(col("b").eq(lit(2)).or(col("c").eq(lit(3)))),
        )
        .build();
    assert_eq!(
        built,
        parsed("SELECT a FROM t WHERE a = 1 AND (b = 2 OR c = 3)")
    );
}

#[test]
fn join_matches() {
    let built = Select::new()
        .column(col("u.id"))
        .from_as("users", "u")
        .join_as(
            JoinKind::Left,
            "orders",
            "o",
            qualified("u", "id").eq(qualified("o", "user_id")),
        )
        .build();
    assert_eq!(
        built,
        parsed("SELECT u.id FROM users u LEFT JOIN orders o ON u.id = o.user_id")
    );
}

#[test]
fn group_having_order_match() {
    let built = Select::new()
        .column(col("status"))
        .column(count_star())
        .from("orders")
        .group_by(&["status"])
        .having(count_star().gt(lit(5)))
        .order_by("status", SortOrder::Asc)
        .build();
    assert_eq!(
        built,
        parsed(
            "SELECT status, COUNT(*) FROM orders \
             GROUP BY status HAVING COUNT(*) > 5 ORDER BY status ASC"
        )
    );
}

#[test]
fn offset_matches() {
    let built = Select::new()
        .column(col("a"))
        .from("t")
        .order_by("a", SortOrder::Desc)
        .offset(10)
        .build();
    assert_eq!(built, parsed("SELECT a FROM t ORDER BY a DESC OFFSET 10 ROWS"));
}

#[test]
fn between_and_in_match() {
    let built = Select::new()
        .column(col("a"))
        .from("t")
        .where_clause(
            col("a")
                .between(lit(1), lit(10))
                .and(col("id").in_list(vec![lit(1), lit(2), lit(3)])),
        )
        .build();
    assert_eq!(
        built,
        parsed("SELECT a FROM t WHERE a BETWEEN 1 AND 10 AND id IN (1, 2, 3)")
    );
}

#[test]
fn in_subquery_matches() {
    let subquery = Select::new().column(col("id")).from("t2").build();
    let built = Select::new()
        .column(col("a"))
        .from("t")
        .where_clause(col("id").in_select(subquery))
        .build();
    assert_eq!(
        built,
        parsed("SELECT a FROM t WHERE id IN (SELECT id FROM t2)")
    );
}

#[test]
fn bind_parameter_matches() {
    let built = Select::new()
        .column(col("a"))
        .from("t")
        .where_clause(col("id").eq(param("id")))
        .build();
    assert_eq!(built, parsed("SELECT a FROM t WHERE id = :id"));
}

#[test]
fn cast_matches() {
    let built = Select::new()
        .column(cast(col("age"), "INT"))
        .from("users")
        .build();
    assert_eq!(built, parsed("SELECT CAST(age AS INT) FROM users"));
}

#[test]
fn union_chain_matches() {
    let built = Select::new()
        .column(col("a"))
        .from("t1")
        .union(Select::new().column(col("a")).from("t2"))
        .union_all(Select::new().column(col("a")).from("t3"))
        .build();
    assert_eq!(
        built,
        parsed("SELECT a FROM t1 UNION SELECT a FROM t2 UNION ALL SELECT a FROM t3")
    );
}

#[test]
fn insert_matches() {
    let built = Insert::into_table("users")
        .columns(&["name", "age"])
        .values(vec![lit("Ada"), lit(36)])
        .build();
    assert_eq!(
        built,
        parsed("INSERT INTO users (name, age) VALUES ('Ada', 36)")
    );
}

#[test]
fn insert_default_matches() {
    let built = Insert::into_table("t")
        .columns(&["a", "b"])
        .values(vec![lit(1), default_value()])
        .build();
    assert_eq!(built, parsed("INSERT INTO t (a, b) VALUES (1, DEFAULT)"));
}

#[test]
fn insert_select_matches() {
    let built = Insert::into_table("archive")
        .columns(&["id"])
        .query(Select::new().column(col("id")).from("live").build())
        .build();
    assert_eq!(built, parsed("INSERT INTO archive (id) SELECT id FROM live"));
}

#[test]
fn update_matches() {
    let built = Update::table("users")
        .set("name", lit("Ada"))
        .set("age", col("age").add(lit(1)))
        .where_clause(col("id").eq(lit(1)))
        .build();
    assert_eq!(
        built,
        parsed("UPDATE users SET name = 'Ada', age = age + 1 WHERE id = 1")
    );
}

#[test]
fn delete_matches() {
    let built = Delete::from("users")
        .where_clause(col("id").eq(lit(1)))
        .build();
    assert_eq!(built, parsed("DELETE FROM users WHERE id = 1"));
}
