//! Демонстрационный каталог для `insert_test_data`
//!
//! Идентификаторы родителей не задаются: их проставляет сервис по мере создания.

use contracts::domain::a001_menu::aggregate::MenuDto;
use contracts::domain::a002_category::aggregate::CategoryDto;
use contracts::domain::a003_sub_category::aggregate::SubCategoryDto;
use contracts::domain::a004_product::aggregate::ProductDto;
use contracts::domain::a005_offer::aggregate::{OfferDto, OfferItem};

pub struct MenuSeed {
    pub menu: MenuDto,
    pub categories: Vec<CategorySeed>,
    pub offers: Vec<OfferDto>,
}

pub struct CategorySeed {
    pub category: CategoryDto,
    pub sub_categories: Vec<SubCategorySeed>,
}

pub struct SubCategorySeed {
    pub sub_category: SubCategoryDto,
    pub products: Vec<ProductDto>,
}

fn menu(name: &str, description: &str) -> MenuDto {
    MenuDto {
        name: name.into(),
        description: description.into(),
        status: true,
        tag_line: None,
    }
}

fn category(name: &str, description: &str, status: bool) -> CategoryDto {
    CategoryDto {
        menu_id: None,
        name: name.into(),
        description: description.into(),
        status,
        image: None,
    }
}

fn sub_category(name: &str, description: &str) -> SubCategoryDto {
    SubCategoryDto {
        category_id: None,
        name: name.into(),
        description: description.into(),
        status: true,
        image: None,
    }
}

fn product(name: &str, description: &str, price: f64, tags: &[&str]) -> ProductDto {
    ProductDto {
        sub_category_id: None,
        category_id: None,
        menu_id: None,
        name: name.into(),
        description: description.into(),
        price,
        status: true,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ingredients: Vec::new(),
        images: Vec::new(),
        allergies: None,
        tag_line: None,
    }
}

fn offer_item(name: &str, price: f64) -> OfferItem {
    OfferItem {
        name: name.into(),
        description: String::new(),
        price,
        image: None,
        status: true,
    }
}

pub fn demo_catalog() -> Vec<MenuSeed> {
    vec![
        MenuSeed {
            menu: menu("Main Menu", "Our primary dining menu"),
            categories: vec![
                CategorySeed {
                    category: category("Hot Beverages", "Warm and comforting drinks", true),
                    sub_categories: vec![
                        SubCategorySeed {
                            sub_category: sub_category("Coffee", "Freshly brewed coffee"),
                            products: vec![
                                product("Espresso", "Strong and rich coffee", 50.0, &["coffee"]),
                                product("Cappuccino", "Espresso with milk foam", 70.0, &["coffee", "milk"]),
                            ],
                        },
                        SubCategorySeed {
                            sub_category: sub_category("Tea", "Loose leaf tea"),
                            products: vec![product("Green Tea", "Light and fresh", 35.0, &["tea"])],
                        },
                    ],
                },
                CategorySeed {
                    category: category("Cold Beverages", "Refreshing chilled drinks", false),
                    sub_categories: vec![SubCategorySeed {
                        sub_category: sub_category("Iced Drinks", "Served over ice"),
                        products: vec![product("Iced Tea", "Refreshing cold tea", 40.0, &["tea", "cold"])],
                    }],
                },
            ],
            offers: vec![OfferDto {
                menu_id: None,
                name: "Breakfast Combo".into(),
                description: "Coffee and a pastry".into(),
                status: true,
                start_date: None,
                end_date: None,
                discount_percentage: 15.0,
                foods: vec![offer_item("Croissant", 45.0)],
                drinks: vec![offer_item("Espresso", 50.0)],
                images: Vec::new(),
            }],
        },
        MenuSeed {
            menu: menu("Drinks Menu", "Beverages and cocktails"),
            categories: vec![CategorySeed {
                category: category("Cocktails", "Signature mixed drinks", true),
                sub_categories: vec![SubCategorySeed {
                    sub_category: sub_category("Classics", "Timeless recipes"),
                    products: vec![product("Mojito", "Rum, mint and lime", 120.0, &["alcohol"])],
                }],
            }],
            offers: Vec::new(),
        },
    ]
}
