// ABOUTME: Static food reference table with per-100g macros and unit-to-gram conversions
// ABOUTME: Alias lookup is case/diacritic-insensitive substring matching in list order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food Catalog
//!
//! Macro values are approximate averages for common Spanish household
//! portions. The catalog is intentionally small: the parser never fabricates
//! a food without an alias match, so unknown foods simply yield no ledger
//! mutation.
//!
//! Matching has no scoring. The first item (in table order) with an alias
//! contained in the normalized text wins, so more specific dishes are listed
//! before their ingredients ("tortilla de patatas" before "patata",
//! "cafe con leche" before "leche").

use std::collections::BTreeMap;
use std::sync::LazyLock;

use nutri_core::models::{FoodCatalogItem, MacrosPer100g};

use crate::text::normalize_text;

/// Compact seed description of one catalog item
struct CatalogSeed {
    id: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
    default_serving_g: f64,
    units: &'static [(&'static str, f64)],
    /// kcal, protein, carbs, fat, fiber per 100 g
    per_100g: (f64, f64, f64, f64, f64),
}

impl CatalogSeed {
    fn build(&self) -> FoodCatalogItem {
        let (kcal, protein_g, carbs_g, fat_g, fiber_g) = self.per_100g;
        FoodCatalogItem {
            id: self.id.to_owned(),
            name: self.name.to_owned(),
            aliases: self.aliases.iter().map(|alias| normalize_text(alias)).collect(),
            default_serving_g: self.default_serving_g,
            units: self
                .units
                .iter()
                .map(|(unit, grams)| ((*unit).to_owned(), *grams))
                .collect::<BTreeMap<_, _>>(),
            per_100g: MacrosPer100g {
                kcal,
                protein_g,
                carbs_g,
                fat_g,
                fiber_g: (fiber_g > 0.0).then_some(fiber_g),
            },
        }
    }
}

const SEEDS: &[CatalogSeed] = &[
    // === Dishes (listed before their ingredients) ===
    CatalogSeed {
        id: "tortilla_patatas",
        name: "Tortilla de patatas",
        aliases: &["tortilla de patata", "tortilla espanola", "tortilla"],
        default_serving_g: 150.0,
        units: &[("racion", 150.0), ("pincho", 100.0)],
        per_100g: (196.0, 6.5, 13.0, 13.0, 1.2),
    },
    CatalogSeed {
        id: "cafe_con_leche",
        name: "Café con leche",
        aliases: &["cafe con leche", "cortado"],
        default_serving_g: 200.0,
        units: &[("taza", 200.0), ("cafe", 200.0)],
        per_100g: (40.0, 2.5, 3.8, 1.5, 0.0),
    },
    CatalogSeed {
        id: "batido_proteina",
        name: "Batido de proteína",
        aliases: &["batido de proteina", "proteina en polvo", "whey"],
        default_serving_g: 30.0,
        units: &[("scoop", 30.0), ("cacito", 30.0), ("batido", 30.0)],
        per_100g: (400.0, 80.0, 8.0, 6.0, 0.0),
    },
    CatalogSeed {
        id: "pizza",
        name: "Pizza",
        aliases: &["pizza"],
        default_serving_g: 300.0,
        units: &[("porcion", 120.0), ("trozo", 120.0), ("pizza", 300.0)],
        per_100g: (266.0, 11.0, 33.0, 10.0, 2.3),
    },
    CatalogSeed {
        id: "ensalada",
        name: "Ensalada verde",
        aliases: &["ensalada"],
        default_serving_g: 150.0,
        units: &[("plato", 200.0), ("bol", 200.0)],
        per_100g: (20.0, 1.2, 3.6, 0.2, 1.8),
    },
    // === Proteins ===
    CatalogSeed {
        id: "huevo",
        name: "Huevo",
        aliases: &["huevo"],
        default_serving_g: 60.0,
        units: &[("unidad", 60.0), ("huevo", 60.0)],
        per_100g: (143.0, 12.6, 0.7, 9.5, 0.0),
    },
    CatalogSeed {
        id: "pollo",
        name: "Pechuga de pollo",
        aliases: &["pechuga de pollo", "pollo"],
        default_serving_g: 150.0,
        units: &[("pechuga", 200.0), ("filete", 120.0)],
        per_100g: (165.0, 31.0, 0.0, 3.6, 0.0),
    },
    CatalogSeed {
        id: "atun",
        name: "Atún al natural",
        aliases: &["atun"],
        default_serving_g: 80.0,
        units: &[("lata", 80.0)],
        per_100g: (116.0, 26.0, 0.0, 1.0, 0.0),
    },
    CatalogSeed {
        id: "salmon",
        name: "Salmón",
        aliases: &["salmon"],
        default_serving_g: 150.0,
        units: &[("filete", 150.0)],
        per_100g: (208.0, 20.0, 0.0, 13.0, 0.0),
    },
    CatalogSeed {
        id: "ternera",
        name: "Ternera",
        aliases: &["ternera", "carne de vacuno", "carne picada"],
        default_serving_g: 150.0,
        units: &[("filete", 150.0)],
        per_100g: (250.0, 26.0, 0.0, 15.0, 0.0),
    },
    CatalogSeed {
        id: "yogur",
        name: "Yogur natural",
        aliases: &["yogur", "yogurt"],
        default_serving_g: 125.0,
        units: &[("unidad", 125.0), ("yogur", 125.0)],
        per_100g: (61.0, 3.5, 4.7, 3.3, 0.0),
    },
    CatalogSeed {
        id: "queso",
        name: "Queso",
        aliases: &["queso"],
        default_serving_g: 40.0,
        units: &[("loncha", 20.0), ("racion", 40.0)],
        per_100g: (350.0, 25.0, 1.5, 27.0, 0.0),
    },
    CatalogSeed {
        id: "leche",
        name: "Leche semidesnatada",
        aliases: &["leche"],
        default_serving_g: 250.0,
        units: &[("vaso", 250.0), ("taza", 250.0)],
        per_100g: (46.0, 3.2, 4.8, 1.6, 0.0),
    },
    // === Grains & legumes ===
    CatalogSeed {
        id: "arroz",
        name: "Arroz cocido",
        aliases: &["arroz"],
        default_serving_g: 150.0,
        units: &[("plato", 200.0), ("taza", 160.0)],
        per_100g: (130.0, 2.7, 28.0, 0.3, 0.4),
    },
    CatalogSeed {
        id: "pasta",
        name: "Pasta cocida",
        aliases: &["pasta", "macarrones", "espagueti", "spaghetti"],
        default_serving_g: 200.0,
        units: &[("plato", 250.0)],
        per_100g: (158.0, 5.8, 31.0, 0.9, 1.8),
    },
    CatalogSeed {
        id: "lentejas",
        name: "Lentejas cocidas",
        aliases: &["lenteja"],
        default_serving_g: 250.0,
        units: &[("plato", 300.0)],
        per_100g: (116.0, 9.0, 20.0, 0.4, 7.9),
    },
    CatalogSeed {
        id: "avena",
        name: "Copos de avena",
        aliases: &["avena", "porridge"],
        default_serving_g: 40.0,
        units: &[("cucharada", 10.0), ("taza", 80.0)],
        per_100g: (389.0, 16.9, 66.3, 6.9, 10.6),
    },
    CatalogSeed {
        id: "pan",
        name: "Pan",
        aliases: &["pan", "tostada"],
        default_serving_g: 60.0,
        units: &[("rebanada", 30.0), ("tostada", 30.0), ("barra", 250.0)],
        per_100g: (265.0, 9.0, 49.0, 3.2, 2.7),
    },
    CatalogSeed {
        id: "patata",
        name: "Patata",
        aliases: &["patata"],
        default_serving_g: 200.0,
        units: &[("unidad", 200.0), ("patata", 200.0)],
        per_100g: (77.0, 2.0, 17.0, 0.1, 2.2),
    },
    // === Fruit & fats ===
    CatalogSeed {
        id: "platano",
        name: "Plátano",
        aliases: &["platano", "banana"],
        default_serving_g: 120.0,
        units: &[("unidad", 120.0), ("platano", 120.0), ("banana", 120.0)],
        per_100g: (89.0, 1.1, 22.8, 0.3, 2.6),
    },
    CatalogSeed {
        id: "manzana",
        name: "Manzana",
        aliases: &["manzana"],
        default_serving_g: 180.0,
        units: &[("unidad", 180.0), ("manzana", 180.0)],
        per_100g: (52.0, 0.3, 13.8, 0.2, 2.4),
    },
    CatalogSeed {
        id: "naranja",
        name: "Naranja",
        aliases: &["naranja"],
        default_serving_g: 130.0,
        units: &[("unidad", 130.0), ("naranja", 130.0)],
        per_100g: (47.0, 0.9, 11.8, 0.1, 2.4),
    },
    CatalogSeed {
        id: "aguacate",
        name: "Aguacate",
        aliases: &["aguacate", "palta"],
        default_serving_g: 100.0,
        units: &[("unidad", 200.0), ("aguacate", 200.0), ("medio", 100.0)],
        per_100g: (160.0, 2.0, 8.5, 14.7, 6.7),
    },
    CatalogSeed {
        id: "almendras",
        name: "Almendras",
        aliases: &["almendra", "frutos secos"],
        default_serving_g: 30.0,
        units: &[("punado", 30.0)],
        per_100g: (579.0, 21.2, 21.6, 49.9, 12.5),
    },
];

static FOOD_CATALOG: LazyLock<Vec<FoodCatalogItem>> =
    LazyLock::new(|| SEEDS.iter().map(CatalogSeed::build).collect());

/// The full built-in catalog in match-priority order
#[must_use]
pub fn food_catalog() -> &'static [FoodCatalogItem] {
    &FOOD_CATALOG
}

/// Find the first built-in catalog item whose alias appears in `text`
#[must_use]
pub fn find_catalog_item_by_text(text: &str) -> Option<&'static FoodCatalogItem> {
    find_in_catalog(food_catalog(), text)
}

/// Find the first item of `catalog` whose alias appears in `text`
///
/// Both sides are normalized, so the match is case- and diacritic-insensitive.
#[must_use]
pub fn find_in_catalog<'a>(catalog: &'a [FoodCatalogItem], text: &str) -> Option<&'a FoodCatalogItem> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return None;
    }
    catalog.iter().find(|item| {
        item.aliases
            .iter()
            .any(|alias| !alias.is_empty() && normalized.contains(&normalize_text(alias)))
    })
}

/// Look up a built-in catalog item by id
#[must_use]
pub fn catalog_item_by_id(id: &str) -> Option<&'static FoodCatalogItem> {
    food_catalog().iter().find(|item| item.id == id)
}
