use std::sync::Arc;

use api::schema::{SchemaType, build_schema};
use chrono::Utc;
use sea_orm::{
    ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement, Value as DbValue,
};

pub struct TestEnv {
    pub db: Arc<DatabaseConnection>,
    pub schema: SchemaType,
}

pub async fn setup() -> TestEnv {
    let conn = Database::connect("sqlite::memory:").await.unwrap();
    let db = Arc::new(conn);
    bootstrap_sqlite(db.as_ref()).await;
    let schema = build_schema(db.clone());
    TestEnv { db, schema }
}

async fn bootstrap_sqlite(db: &DatabaseConnection) {
    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "PRAGMA foreign_keys = ON;",
    ))
    .await
    .unwrap();

    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"
        CREATE TABLE company_types (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );
        "#,
    ))
    .await
    .unwrap();

    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"
        CREATE TABLE products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL
        );
        "#,
    ))
    .await
    .unwrap();

    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"
        CREATE TABLE partners (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            company_name TEXT NOT NULL,
            type_id INTEGER,
            director_full_name TEXT NOT NULL,
            phone TEXT NOT NULL,
            rating REAL NOT NULL,
            discount INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY(type_id) REFERENCES company_types(id)
        );
        "#,
    ))
    .await
    .unwrap();

    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"
        CREATE TABLE partner_sales (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            partner_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL,
            date_of_sale TEXT NOT NULL,
            FOREIGN KEY(product_id) REFERENCES products(id),
            FOREIGN KEY(partner_id) REFERENCES partners(id)
        );
        "#,
    ))
    .await
    .unwrap();
}

pub async fn insert_company_type(db: &DatabaseConnection, id: i32, name: &str) {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO company_types (id, name) VALUES (?, ?)",
        vec![id.into(), name.into()],
    ))
    .await
    .unwrap();
}

pub async fn insert_product(db: &DatabaseConnection, id: i32, description: &str) {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO products (id, description) VALUES (?, ?)",
        vec![id.into(), description.into()],
    ))
    .await
    .unwrap();
}

pub async fn insert_partner(
    db: &DatabaseConnection,
    id: i32,
    company_name: &str,
    type_id: Option<i32>,
    director: &str,
    phone: &str,
) {
    let now = Utc::now().to_rfc3339();
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO partners (id, company_name, type_id, director_full_name, phone, rating, discount, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        vec![
            id.into(),
            company_name.into(),
            DbValue::from(type_id),
            director.into(),
            phone.into(),
            5.0f64.into(),
            0.into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await
    .unwrap();
}

pub async fn insert_sale(
    db: &DatabaseConnection,
    id: i32,
    product_id: i32,
    partner_id: i32,
    quantity: i32,
    date_of_sale: &str,
) {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO partner_sales (id, product_id, partner_id, quantity, date_of_sale) \
         VALUES (?, ?, ?, ?, ?)",
        vec![
            id.into(),
            product_id.into(),
            partner_id.into(),
            quantity.into(),
            date_of_sale.into(),
        ],
    ))
    .await
    .unwrap();
}

pub async fn count_partners(db: &DatabaseConnection) -> u64 {
    use sea_orm::{EntityTrait, PaginatorTrait};
    entity::partners::Entity::find().count(db).await.unwrap()
}
