mod common;

use async_graphql::{Request, Variables};
use serde_json::{Value, json};

use common::{count_partners, insert_company_type, insert_partner, insert_product, insert_sale};

const SAVE_PARTNER: &str = r#"
    mutation Save($input: PartnerInput!, $id: Int) {
        savePartner(input: $input, id: $id) {
            id
            companyName
            typeName
            directorFullName
            phone
            rating
            discount
        }
    }
"#;

fn partner_input(company_name: &str) -> Value {
    json!({
        "companyName": company_name,
        "typeId": 1,
        "directorFullName": "Иванов Иван Иванович",
        "phone": "+7 912 000 11 22",
        "rating": "7.5",
    })
}

#[tokio::test]
async fn insert_derives_discount_from_existing_sales() {
    let env = common::setup().await;
    insert_company_type(env.db.as_ref(), 1, "ООО").await;
    insert_product(env.db.as_ref(), 1, "Ламинат Дуб серый 32 класс").await;
    // Sales recorded under the same company name drive the discount of the
    // row being saved: 8_000 + 4_000 lands in the 5% tier.
    insert_partner(env.db.as_ref(), 1, "База Строитель", Some(1), "Петров", "123").await;
    insert_sale(env.db.as_ref(), 1, 1, 1, 8_000, "2023-11-02").await;
    insert_sale(env.db.as_ref(), 2, 1, 1, 4_000, "2023-12-18").await;

    let request = Request::new(SAVE_PARTNER).variables(Variables::from_json(json!({
        "input": partner_input("База Строитель"),
    })));
    let response = env.schema.execute(request).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let body = response.data.into_json().unwrap();
    assert_eq!(body["savePartner"]["discount"], json!(5));
    assert_eq!(body["savePartner"]["companyName"], json!("База Строитель"));
    assert_eq!(body["savePartner"]["typeName"], json!("ООО"));
    assert_eq!(body["savePartner"]["rating"], json!(7.5));
    assert_eq!(count_partners(env.db.as_ref()).await, 2);
}

#[tokio::test]
async fn insert_without_sales_gets_the_zero_tier() {
    let env = common::setup().await;
    insert_company_type(env.db.as_ref(), 1, "ЗАО").await;

    let request = Request::new(SAVE_PARTNER).variables(Variables::from_json(json!({
        "input": partner_input("Новый Партнер"),
    })));
    let response = env.schema.execute(request).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let body = response.data.into_json().unwrap();
    assert_eq!(body["savePartner"]["discount"], json!(0));
    assert_eq!(count_partners(env.db.as_ref()).await, 1);
}

#[tokio::test]
async fn validation_failures_name_the_field_and_write_nothing() {
    let env = common::setup().await;
    insert_company_type(env.db.as_ref(), 1, "ООО").await;

    let cases = [
        (json!({"companyName": "", "typeId": 1, "directorFullName": "Иванов", "phone": "1", "rating": "5"}), "Company name is required"),
        (json!({"companyName": "А", "typeId": 1, "directorFullName": "  ", "phone": "1", "rating": "5"}), "Director full name is required"),
        (json!({"companyName": "А", "typeId": 1, "directorFullName": "Иванов", "phone": "", "rating": "5"}), "Phone is required"),
        (json!({"companyName": "А", "directorFullName": "Иванов", "phone": "1", "rating": "5"}), "Company type is required"),
        (json!({"companyName": "А", "typeId": 1, "directorFullName": "Иванов", "phone": "1", "rating": "abc"}), "Rating must be a number"),
    ];

    for (input, expected) in cases {
        let request = Request::new(SAVE_PARTNER)
            .variables(Variables::from_json(json!({ "input": input })));
        let response = env.schema.execute(request).await;
        assert_eq!(response.errors.len(), 1, "case {expected}");
        let error = &response.errors[0];
        assert_eq!(error.message, expected);
        let code = error
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("VALIDATION")));
    }

    assert_eq!(count_partners(env.db.as_ref()).await, 0);
}

#[tokio::test]
async fn update_replaces_every_field_and_keeps_the_row_count() {
    let env = common::setup().await;
    insert_company_type(env.db.as_ref(), 1, "ООО").await;
    insert_company_type(env.db.as_ref(), 2, "ПАО").await;
    insert_product(env.db.as_ref(), 1, "Паркетная доска Ясень темный").await;
    insert_partner(env.db.as_ref(), 1, "База Строитель", Some(1), "Петров", "123").await;
    // 60_000 total puts the renamed partner into the 10% tier on save.
    insert_sale(env.db.as_ref(), 1, 1, 1, 60_000, "2024-01-20").await;

    let input = json!({
        "companyName": "База Строитель",
        "typeId": 2,
        "directorFullName": "Сидорова Анна Павловна",
        "phone": "+7 900 555 44 33",
        "rating": "9",
    });
    let request = Request::new(SAVE_PARTNER).variables(Variables::from_json(json!({
        "input": input,
        "id": 1,
    })));
    let response = env.schema.execute(request).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let body = response.data.into_json().unwrap();
    assert_eq!(body["savePartner"]["id"], json!(1));
    assert_eq!(body["savePartner"]["typeName"], json!("ПАО"));
    assert_eq!(
        body["savePartner"]["directorFullName"],
        json!("Сидорова Анна Павловна")
    );
    assert_eq!(body["savePartner"]["phone"], json!("+7 900 555 44 33"));
    assert_eq!(body["savePartner"]["rating"], json!(9.0));
    assert_eq!(body["savePartner"]["discount"], json!(10));
    assert_eq!(count_partners(env.db.as_ref()).await, 1);
}

#[tokio::test]
async fn updating_a_missing_partner_is_not_found() {
    let env = common::setup().await;
    insert_company_type(env.db.as_ref(), 1, "ООО").await;

    let request = Request::new(SAVE_PARTNER).variables(Variables::from_json(json!({
        "input": partner_input("Кто-то"),
        "id": 999,
    })));
    let response = env.schema.execute(request).await;
    assert_eq!(response.errors.len(), 1);
    let error = &response.errors[0];
    assert_eq!(error.message, "resource not found");
    let code = error
        .extensions
        .as_ref()
        .and_then(|ext| ext.get("code"))
        .cloned();
    assert_eq!(code, Some(async_graphql::Value::from("NOT_FOUND")));
    assert_eq!(count_partners(env.db.as_ref()).await, 0);
}

#[tokio::test]
async fn partners_query_keeps_rows_with_unknown_type() {
    let env = common::setup().await;
    insert_company_type(env.db.as_ref(), 1, "ООО").await;
    insert_partner(env.db.as_ref(), 1, "База Строитель", Some(1), "Петров", "123").await;
    insert_partner(env.db.as_ref(), 2, "Безтиповой", None, "Козлов", "456").await;

    let response = env
        .schema
        .execute(Request::new(
            "{ partners { id companyName typeName discount } }",
        ))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let body = response.data.into_json().unwrap();
    let partners = body["partners"].as_array().unwrap();
    assert_eq!(partners.len(), 2);
    assert_eq!(partners[0]["typeName"], json!("ООО"));
    assert_eq!(partners[1]["companyName"], json!("Безтиповой"));
    assert_eq!(partners[1]["typeName"], json!(""));
}

#[tokio::test]
async fn total_sales_sums_only_the_named_partner() {
    let env = common::setup().await;
    insert_company_type(env.db.as_ref(), 1, "ООО").await;
    insert_product(env.db.as_ref(), 1, "Ламинат Дуб серый 32 класс").await;
    insert_partner(env.db.as_ref(), 1, "База Строитель", Some(1), "Петров", "123").await;
    insert_partner(env.db.as_ref(), 2, "Другой", Some(1), "Козлов", "456").await;
    insert_sale(env.db.as_ref(), 1, 1, 1, 1_000, "2024-01-01").await;
    insert_sale(env.db.as_ref(), 2, 1, 1, 2_500, "2024-02-01").await;
    insert_sale(env.db.as_ref(), 3, 1, 2, 9_000, "2024-02-02").await;

    let total = api::repository::total_sales_for(env.db.as_ref(), "База Строитель")
        .await
        .unwrap();
    assert_eq!(total, 3_500);

    let missing = api::repository::total_sales_for(env.db.as_ref(), "Нет такого")
        .await
        .unwrap();
    assert_eq!(missing, 0);
}
