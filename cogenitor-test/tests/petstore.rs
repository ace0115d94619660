#![allow(dead_code)]
#![allow(unused_variables)]
#![allow(non_snake_case)]
#![allow(non_camel_case_types)]

cogenitor_macro::generate_api!(path = "test-data/petstore.yaml");

use serde_json::json;

#[test]
fn test_pet_struct_round_trips() {
    let pet = generated_api::Pet {
        id: 1,
        name: "Doggy".to_string(),
        category: generated_api::Category {
            id: 1000,
            name: "Dogs".to_string(),
        },
        status: "placed".to_string(),
        photoUrls: vec![],
        tags: vec![],
    };

    let value = serde_json::to_value(&pet).unwrap();
    let expected_value = json!({
        "id": 1,
        "name": "Doggy",
        "category": {
            "id": 1000,
            "name": "Dogs"
        },
        "status": "placed",
        "photoUrls": [],
        "tags": [],
    });
    assert_eq!(expected_value, value);

    let other_pet = serde_json::from_value::<generated_api::Pet>(value).unwrap();
    assert_eq!(pet, other_pet);
}

#[test]
fn test_order_struct_round_trips() {
    let order = generated_api::Order {
        id: 10,
        petId: 1,
        quantity: 2,
        shipDate: "2026-01-01T00:00:00Z".to_string(),
        status: "placed".to_string(),
        complete: false,
    };

    let value = serde_json::to_value(&order).unwrap();
    let other_order = serde_json::from_value::<generated_api::Order>(value).unwrap();
    assert_eq!(order, other_order);
}
