//! The built-in emission factor dataset, compiled into the binary.
//!
//! All values are kg CO2e per unit, sourced from internationally recognized
//! standards: DEFRA (UK), EPA (US), IPCC, and IEA grid-intensity data.
//! Negative factors model avoided emissions (recycling credit); zero factors
//! are genuinely zero-emission activities (walking, cycling).
//!
//! Keys are stored pre-normalized; the builder rejects anything else, and a
//! test below locks the dataset against accidental duplicates or typos.

use co2e_core::engine::Engine;
use co2e_core::table::{FactorTable, FactorTableBuilder, TableBuildError};

/// The built-in factor table. Panics only if the compiled-in dataset is
/// internally inconsistent, which the test suite rules out.
pub fn builtin_table() -> FactorTable {
    build().expect("built-in factor dataset is internally consistent")
}

/// An engine over [`builtin_table`].
pub fn builtin_engine() -> Engine {
    Engine::new(builtin_table())
}

fn build() -> Result<FactorTable, TableBuildError> {
    let mut b = FactorTableBuilder::new();
    electricity(&mut b);
    travel(&mut b);
    fuel(&mut b);
    waste(&mut b);
    production(&mut b);
    logistics(&mut b);
    water(&mut b);
    b.build()
}

/// Grid carbon intensity by generation source and usage location.
/// Default: global average grid intensity (IEA 2024).
fn electricity(b: &mut FactorTableBuilder) {
    b.defaults(
        "electricity",
        &[("kwh", 0.475), ("mwh", 475.0), ("gwh", 475_000.0)],
    );

    b.subcategory("electricity", "grid", &[("kwh", 0.475), ("mwh", 475.0)])
        .subcategory("electricity", "coal", &[("kwh", 0.950), ("mwh", 950.0)])
        .subcategory("electricity", "natural_gas", &[("kwh", 0.450), ("mwh", 450.0)])
        .subcategory("electricity", "oil", &[("kwh", 0.650), ("mwh", 650.0)])
        .subcategory("electricity", "renewable", &[("kwh", 0.012), ("mwh", 12.0)])
        .subcategory("electricity", "solar", &[("kwh", 0.048), ("mwh", 48.0)])
        .subcategory("electricity", "wind", &[("kwh", 0.011), ("mwh", 11.0)])
        .subcategory("electricity", "nuclear", &[("kwh", 0.012), ("mwh", 12.0)])
        .subcategory("electricity", "hydro", &[("kwh", 0.024), ("mwh", 24.0)]);

    // Usage locations share the grid average.
    for location in ["home", "apartment", "office", "factory", "warehouse", "retail"] {
        b.subcategory("electricity", location, &[("kwh", 0.475), ("mwh", 475.0)]);
    }

    b.generic("electricity", &[("kwh", 0.475), ("mwh", 475.0)]);
}

/// Passenger transport by vehicle type (DEFRA 2024). Aviation factors
/// include radiative forcing; `hours` units assume typical cruise speeds.
fn travel(b: &mut FactorTableBuilder) {
    // Personal vehicles.
    b.subcategory("travel", "car", &[("km", 0.192), ("mile", 0.309), ("miles", 0.309)])
        .subcategory("travel", "car_small", &[("km", 0.142), ("mile", 0.229), ("miles", 0.229)])
        .subcategory("travel", "car_medium", &[("km", 0.192), ("mile", 0.309), ("miles", 0.309)])
        .subcategory("travel", "car_large", &[("km", 0.282), ("mile", 0.454), ("miles", 0.454)])
        .subcategory("travel", "car_electric", &[("km", 0.053), ("mile", 0.085), ("miles", 0.085)])
        .subcategory("travel", "car_hybrid", &[("km", 0.109), ("mile", 0.175), ("miles", 0.175)])
        .subcategory("travel", "motorcycle", &[("km", 0.113), ("mile", 0.182), ("miles", 0.182)])
        .subcategory("travel", "motorcycle_small", &[("km", 0.084), ("mile", 0.135), ("miles", 0.135)])
        .subcategory("travel", "motorcycle_medium", &[("km", 0.103), ("mile", 0.166), ("miles", 0.166)])
        .subcategory("travel", "motorcycle_large", &[("km", 0.134), ("mile", 0.216), ("miles", 0.216)])
        .subcategory("travel", "scooter", &[("km", 0.072), ("mile", 0.116), ("miles", 0.116)]);

    // Public transport.
    b.subcategory("travel", "bus", &[("km", 0.089), ("mile", 0.143), ("miles", 0.143)])
        .subcategory("travel", "bus_local", &[("km", 0.089), ("mile", 0.143), ("miles", 0.143)])
        .subcategory("travel", "coach", &[("km", 0.027), ("mile", 0.043), ("miles", 0.043)])
        .subcategory("travel", "train", &[("km", 0.041), ("mile", 0.066), ("miles", 0.066)])
        .subcategory("travel", "train_electric", &[("km", 0.035), ("mile", 0.056), ("miles", 0.056)])
        .subcategory("travel", "train_diesel", &[("km", 0.061), ("mile", 0.098), ("miles", 0.098)])
        .subcategory("travel", "subway", &[("km", 0.028), ("mile", 0.045), ("miles", 0.045)])
        .subcategory("travel", "metro", &[("km", 0.028), ("mile", 0.045), ("miles", 0.045)])
        .subcategory("travel", "tram", &[("km", 0.029), ("mile", 0.047), ("miles", 0.047)])
        .subcategory("travel", "light_rail", &[("km", 0.029), ("mile", 0.047), ("miles", 0.047)]);

    // Aviation, by distance band and cabin class.
    b.subcategory(
        "travel",
        "plane",
        &[("km", 0.255), ("mile", 0.410), ("miles", 0.410), ("hours", 90.0)],
    )
    .subcategory(
        "travel",
        "plane_short",
        &[("km", 0.156), ("mile", 0.251), ("miles", 0.251), ("hours", 70.0)],
    )
    .subcategory(
        "travel",
        "plane_domestic",
        &[("km", 0.156), ("mile", 0.251), ("miles", 0.251), ("hours", 70.0)],
    )
    .subcategory(
        "travel",
        "plane_medium",
        &[("km", 0.150), ("mile", 0.241), ("miles", 0.241), ("hours", 85.0)],
    )
    .subcategory(
        "travel",
        "plane_long",
        &[("km", 0.195), ("mile", 0.314), ("miles", 0.314), ("hours", 100.0)],
    )
    .subcategory(
        "travel",
        "plane_international",
        &[("km", 0.195), ("mile", 0.314), ("miles", 0.314), ("hours", 100.0)],
    )
    .subcategory(
        "travel",
        "plane_economy",
        &[("km", 0.150), ("mile", 0.241), ("miles", 0.241), ("hours", 85.0)],
    )
    .subcategory(
        "travel",
        "plane_premium_economy",
        &[("km", 0.225), ("mile", 0.362), ("miles", 0.362), ("hours", 128.0)],
    )
    .subcategory(
        "travel",
        "plane_business",
        &[("km", 0.450), ("mile", 0.724), ("miles", 0.724), ("hours", 255.0)],
    )
    .subcategory(
        "travel",
        "plane_first",
        &[("km", 0.600), ("mile", 0.966), ("miles", 0.966), ("hours", 340.0)],
    );

    // Taxis and ride-sharing.
    b.subcategory("travel", "taxi", &[("km", 0.211), ("mile", 0.340), ("miles", 0.340)])
        .subcategory("travel", "taxi_electric", &[("km", 0.053), ("mile", 0.085), ("miles", 0.085)])
        .subcategory("travel", "rideshare", &[("km", 0.192), ("mile", 0.309), ("miles", 0.309)])
        .subcategory("travel", "rideshare_shared", &[("km", 0.096), ("mile", 0.155), ("miles", 0.155)]);

    // Zero and near-zero emission.
    b.subcategory("travel", "bike", &[("km", 0.0), ("mile", 0.0), ("miles", 0.0)])
        .subcategory("travel", "ebike", &[("km", 0.005), ("mile", 0.008), ("miles", 0.008)])
        .subcategory("travel", "walk", &[("km", 0.0), ("mile", 0.0), ("miles", 0.0)]);

    b.generic("travel", &[("km", 0.192), ("mile", 0.309), ("miles", 0.309)]);
}

/// Fuel combustion by carbon content and oxidation factor.
fn fuel(b: &mut FactorTableBuilder) {
    // Liquid fuels.
    b.subcategory(
        "fuel",
        "gasoline",
        &[("liter", 2.310), ("liters", 2.310), ("gallon", 8.744), ("gallons", 8.744), ("kg", 3.156)],
    )
    .subcategory(
        "fuel",
        "petrol",
        &[("liter", 2.310), ("liters", 2.310), ("gallon", 8.744), ("gallons", 8.744), ("kg", 3.156)],
    )
    .subcategory(
        "fuel",
        "diesel",
        &[("liter", 2.680), ("liters", 2.680), ("gallon", 10.146), ("gallons", 10.146), ("kg", 3.156)],
    )
    .subcategory(
        "fuel",
        "jet_fuel",
        &[("liter", 2.520), ("liters", 2.520), ("gallon", 9.540), ("gallons", 9.540), ("kg", 3.150)],
    )
    .subcategory(
        "fuel",
        "kerosene",
        &[("liter", 2.530), ("liters", 2.530), ("gallon", 9.578), ("gallons", 9.578), ("kg", 3.150)],
    )
    .subcategory(
        "fuel",
        "heating_oil",
        &[("liter", 2.960), ("liters", 2.960), ("gallon", 11.206), ("gallons", 11.206), ("kg", 3.200)],
    )
    .subcategory(
        "fuel",
        "lpg",
        &[("liter", 1.510), ("liters", 1.510), ("gallon", 5.715), ("gallons", 5.715), ("kg", 2.983)],
    );

    // Gaseous fuels.
    b.subcategory(
        "fuel",
        "natural_gas",
        &[
            ("cubic_meter", 2.000),
            ("cubic_meters", 2.000),
            ("m3", 2.000),
            ("ccf", 56.597),
            ("therm", 5.300),
            ("kg", 2.750),
        ],
    )
    .subcategory(
        "fuel",
        "methane",
        &[("cubic_meter", 2.000), ("cubic_meters", 2.000), ("m3", 2.000), ("kg", 2.750)],
    )
    .subcategory(
        "fuel",
        "propane",
        &[
            ("cubic_meter", 2.350),
            ("cubic_meters", 2.350),
            ("m3", 2.350),
            ("gallon", 5.740),
            ("gallons", 5.740),
            ("kg", 2.983),
        ],
    )
    .subcategory(
        "fuel",
        "butane",
        &[("cubic_meter", 2.920), ("cubic_meters", 2.920), ("m3", 2.920), ("kg", 3.030)],
    );

    // Solid fuels.
    b.subcategory(
        "fuel",
        "coal",
        &[("kg", 2.860), ("ton", 2860.0), ("tons", 2860.0), ("tonne", 2860.0), ("tonnes", 2860.0)],
    )
    .subcategory("fuel", "coal_anthracite", &[("kg", 3.240), ("ton", 3240.0), ("tons", 3240.0)])
    .subcategory("fuel", "coal_lignite", &[("kg", 1.200), ("ton", 1200.0), ("tons", 1200.0)])
    .subcategory("fuel", "charcoal", &[("kg", 2.500), ("ton", 2500.0), ("tons", 2500.0)])
    .subcategory("fuel", "wood", &[("kg", 1.500), ("ton", 1500.0), ("tons", 1500.0)])
    .subcategory("fuel", "peat", &[("kg", 1.000), ("ton", 1000.0), ("tons", 1000.0)]);

    b.generic(
        "fuel",
        &[("liter", 2.310), ("liters", 2.310), ("gallon", 8.744), ("gallons", 8.744)],
    );
}

/// Waste disposal, including methane from landfill decomposition. The
/// `*_recycled` factors are negative: emissions avoided by recycling.
fn waste(b: &mut FactorTableBuilder) {
    b.subcategory(
        "waste",
        "household",
        &[
            ("kg", 0.500),
            ("lbs", 0.227),
            ("pound", 0.227),
            ("pounds", 0.227),
            ("bag", 3.000),
            ("bags", 3.000),
            ("ton", 500.0),
            ("tons", 500.0),
        ],
    )
    .subcategory("waste", "commercial", &[("kg", 0.450), ("lbs", 0.204), ("ton", 450.0), ("tons", 450.0)])
    .subcategory("waste", "industrial", &[("kg", 0.800), ("lbs", 0.363), ("ton", 800.0), ("tons", 800.0)]);

    b.subcategory(
        "waste",
        "recyclable",
        &[("kg", 0.021), ("lbs", 0.010), ("bag", 0.126), ("bags", 0.126)],
    )
    .subcategory("waste", "paper", &[("kg", 0.900), ("lbs", 0.408), ("ton", 900.0), ("tons", 900.0)])
    .subcategory("waste", "paper_recycled", &[("kg", -1.700), ("lbs", -0.771)])
    .subcategory("waste", "plastic", &[("kg", 2.100), ("lbs", 0.953), ("ton", 2100.0), ("tons", 2100.0)])
    .subcategory("waste", "plastic_recycled", &[("kg", -1.500), ("lbs", -0.680)])
    .subcategory("waste", "glass", &[("kg", 0.500), ("lbs", 0.227), ("ton", 500.0), ("tons", 500.0)])
    .subcategory("waste", "glass_recycled", &[("kg", -0.400), ("lbs", -0.181)])
    .subcategory("waste", "metal", &[("kg", 0.700), ("lbs", 0.318), ("ton", 700.0), ("tons", 700.0)])
    .subcategory("waste", "metal_recycled", &[("kg", -5.000), ("lbs", -2.268)]);

    b.subcategory(
        "waste",
        "organic",
        &[("kg", 0.300), ("lbs", 0.136), ("bag", 1.800), ("bags", 1.800)],
    )
    .subcategory("waste", "food", &[("kg", 0.500), ("lbs", 0.227)])
    .subcategory("waste", "compost", &[("kg", 0.100), ("lbs", 0.045)]);

    b.subcategory("waste", "electronic", &[("kg", 1.500), ("lbs", 0.680), ("unit", 10.000)])
        .subcategory("waste", "hazardous", &[("kg", 2.000), ("lbs", 0.907), ("ton", 2000.0), ("tons", 2000.0)])
        .subcategory("waste", "medical", &[("kg", 1.800), ("lbs", 0.816)])
        .subcategory(
            "waste",
            "construction",
            &[
                ("kg", 0.400),
                ("lbs", 0.181),
                ("ton", 400.0),
                ("tons", 400.0),
                ("cubic_meter", 200.0),
                ("cubic_meters", 200.0),
                ("m3", 200.0),
            ],
        );

    b.generic("waste", &[("kg", 0.500), ("lbs", 0.227), ("bag", 3.000), ("bags", 3.000)]);
}

/// Production and manufacturing, from lifecycle analysis data.
fn production(b: &mut FactorTableBuilder) {
    // Metals and construction materials.
    b.subcategory("production", "steel", &[("kg", 1.850), ("ton", 1850.0), ("tons", 1850.0)])
        .subcategory("production", "steel_recycled", &[("kg", 0.450), ("ton", 450.0), ("tons", 450.0)])
        .subcategory("production", "aluminum", &[("kg", 11.500), ("ton", 11500.0), ("tons", 11500.0)])
        .subcategory("production", "aluminum_recycled", &[("kg", 0.600), ("ton", 600.0), ("tons", 600.0)])
        .subcategory("production", "copper", &[("kg", 3.000), ("ton", 3000.0), ("tons", 3000.0)])
        .subcategory("production", "cement", &[("kg", 0.930), ("ton", 930.0), ("tons", 930.0)])
        .subcategory(
            "production",
            "concrete",
            &[("kg", 0.130), ("ton", 130.0), ("tons", 130.0), ("cubic_meter", 325.0), ("m3", 325.0)],
        )
        .subcategory("production", "brick", &[("kg", 0.240), ("unit", 0.240)]);

    // Plastics, paper, glass.
    b.subcategory("production", "plastic", &[("kg", 3.500), ("ton", 3500.0), ("tons", 3500.0)])
        .subcategory("production", "pet", &[("kg", 3.400), ("ton", 3400.0), ("tons", 3400.0)])
        .subcategory("production", "hdpe", &[("kg", 1.900), ("ton", 1900.0), ("tons", 1900.0)])
        .subcategory("production", "pvc", &[("kg", 2.000), ("ton", 2000.0), ("tons", 2000.0)])
        .subcategory("production", "paper", &[("kg", 1.300), ("ton", 1300.0), ("tons", 1300.0)])
        .subcategory("production", "paper_recycled", &[("kg", 0.700), ("ton", 700.0), ("tons", 700.0)])
        .subcategory("production", "cardboard", &[("kg", 1.000), ("ton", 1000.0), ("tons", 1000.0)])
        .subcategory("production", "glass", &[("kg", 0.850), ("ton", 850.0), ("tons", 850.0)]);

    // Food production, kg CO2e per kg of product. Livestock factors are
    // dominated by enteric fermentation.
    b.subcategory("production", "beef", &[("kg", 27.000)])
        .subcategory("production", "lamb", &[("kg", 24.000)])
        .subcategory("production", "pork", &[("kg", 7.000)])
        .subcategory("production", "chicken", &[("kg", 6.900)])
        .subcategory("production", "turkey", &[("kg", 10.900)])
        .subcategory("production", "fish", &[("kg", 5.500)])
        .subcategory("production", "fish_wild", &[("kg", 2.900)])
        .subcategory("production", "prawns", &[("kg", 26.000)])
        .subcategory("production", "milk", &[("liter", 1.300), ("liters", 1.300), ("kg", 1.300)])
        .subcategory("production", "cheese", &[("kg", 13.500)])
        .subcategory("production", "butter", &[("kg", 23.800)])
        .subcategory("production", "eggs", &[("kg", 4.500), ("dozen", 2.700)])
        .subcategory("production", "vegetables", &[("kg", 0.400)])
        .subcategory("production", "fruits", &[("kg", 0.500)])
        .subcategory("production", "grains", &[("kg", 0.500)])
        .subcategory("production", "rice", &[("kg", 2.700)])
        .subcategory("production", "legumes", &[("kg", 0.900)])
        .subcategory("production", "nuts", &[("kg", 2.300)]);

    // Generic manufacturing operations.
    b.subcategory("production", "manufacturing", &[("unit", 1.500), ("units", 1.500), ("hours", 10.000)])
        .subcategory("production", "assembly", &[("unit", 0.800), ("hours", 5.000)])
        .subcategory("production", "processing", &[("kg", 0.500), ("ton", 500.0)])
        .subcategory("production", "packaging", &[("unit", 0.300), ("kg", 0.200)]);

    b.generic("production", &[("kg", 1.500), ("unit", 1.500), ("units", 1.500)]);
}

/// Freight and logistics. `ton_km` factors are per ton-kilometer; heavier
/// vehicles emit more per km but less per ton moved.
fn logistics(b: &mut FactorTableBuilder) {
    b.subcategory(
        "logistics",
        "truck_small",
        &[("km", 0.300), ("mile", 0.483), ("miles", 0.483), ("ton_km", 0.140)],
    )
    .subcategory("logistics", "van", &[("km", 0.250), ("mile", 0.402), ("miles", 0.402)])
    .subcategory(
        "logistics",
        "truck_medium",
        &[("km", 0.500), ("mile", 0.805), ("miles", 0.805), ("ton_km", 0.100)],
    )
    .subcategory(
        "logistics",
        "truck_heavy",
        &[("km", 0.800), ("mile", 1.287), ("miles", 1.287), ("ton_km", 0.062)],
    )
    .subcategory(
        "logistics",
        "truck_articulated",
        &[("km", 0.800), ("mile", 1.287), ("miles", 1.287), ("ton_km", 0.062)],
    );

    b.subcategory("logistics", "ship", &[("ton_km", 0.011)])
        .subcategory("logistics", "cargo_ship", &[("ton_km", 0.011)])
        .subcategory("logistics", "container_ship", &[("ton_km", 0.011)])
        .subcategory("logistics", "tanker", &[("ton_km", 0.005)])
        .subcategory("logistics", "air_freight", &[("ton_km", 0.602)])
        .subcategory("logistics", "rail_freight", &[("ton_km", 0.027)])
        .subcategory("logistics", "train_freight", &[("ton_km", 0.027)]);

    b.subcategory(
        "logistics",
        "courier",
        &[("package", 2.500), ("packages", 2.500), ("km", 0.250), ("mile", 0.402), ("miles", 0.402)],
    )
    .subcategory("logistics", "delivery", &[("package", 2.500), ("packages", 2.500)])
    .subcategory("logistics", "warehouse", &[("sqm_year", 15.0), ("sqft_year", 1.394)])
    .subcategory("logistics", "storage", &[("cubic_meter", 0.100), ("m3", 0.100)])
    .subcategory("logistics", "distribution", &[("km", 0.500), ("mile", 0.805), ("miles", 0.805)])
    .subcategory("logistics", "shipping", &[("package", 2.500), ("packages", 2.500)]);

    b.generic("logistics", &[("km", 0.800), ("mile", 1.287), ("miles", 1.287)]);
}

/// Water supply and treatment emissions.
fn water(b: &mut FactorTableBuilder) {
    b.defaults(
        "water",
        &[
            ("liter", 0.000344),
            ("liters", 0.000344),
            ("gallon", 0.001302),
            ("gallons", 0.001302),
            ("cubic_meter", 0.344),
            ("cubic_meters", 0.344),
            ("m3", 0.344),
        ],
    );
    b.generic("water", &[("liter", 0.000344), ("liters", 0.000344)]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use co2e_core::table::{Confidence, Tier};

    #[test]
    fn builtin_dataset_builds() {
        // Locks the dataset against duplicate triples, unnormalized keys,
        // and non-finite values; builtin_table() relies on this.
        let table = build().expect("dataset must validate");
        assert_eq!(table.category_count(), 7);
    }

    #[test]
    fn categories_in_declaration_order() {
        let table = builtin_table();
        assert_eq!(
            table.list_categories(),
            ["electricity", "travel", "fuel", "waste", "production", "logistics", "water"]
        );
    }

    #[test]
    fn every_category_resolves_at_least_one_unit() {
        let table = builtin_table();
        for category in table.list_categories() {
            assert!(
                !table.valid_units(category, None).is_empty(),
                "category '{category}' has no valid units"
            );
        }
    }

    #[test]
    fn spot_check_grid_average() {
        let table = builtin_table();
        let m = table.lookup("electricity", None, "kwh").unwrap();
        assert_eq!(m.factor, 0.475);
        assert_eq!(m.tier, Tier::CategoryDefault);
    }

    #[test]
    fn spot_check_electric_car() {
        let table = builtin_table();
        let m = table.lookup("travel", Some("car_electric"), "km").unwrap();
        assert_eq!(m.factor, 0.053);
        assert_eq!(m.tier.confidence(), Confidence::High);
    }

    #[test]
    fn spot_check_recycling_credits_are_negative() {
        let table = builtin_table();
        for sub in ["paper_recycled", "plastic_recycled", "glass_recycled", "metal_recycled"] {
            let m = table.lookup("waste", Some(sub), "kg").unwrap();
            assert!(m.factor < 0.0, "waste.{sub}.kg should be a credit");
        }
        // production's recycled materials are reduced, not negative.
        let m = table.lookup("production", Some("paper_recycled"), "kg").unwrap();
        assert!(m.factor > 0.0);
    }

    #[test]
    fn spot_check_zero_emission_travel() {
        let table = builtin_table();
        assert_eq!(table.lookup("travel", Some("walk"), "km").unwrap().factor, 0.0);
        assert_eq!(table.lookup("travel", Some("bike"), "km").unwrap().factor, 0.0);
    }

    #[test]
    fn ton_km_reachable_through_hyphen_spelling() {
        // The normalized table stores only "ton_km"; "ton-km" arrives there
        // via engine normalization.
        let engine = builtin_engine();
        let r = engine.calculate("logistics", 100.0, "ton-km", Some("ship")).unwrap();
        assert_eq!(r.unit, "ton_km");
        assert_eq!(r.factor, 0.011);
    }

    #[test]
    fn travel_has_no_default_tier() {
        // Travel resolves bare units through the generic tier only.
        let table = builtin_table();
        let m = table.lookup("travel", None, "km").unwrap();
        assert_eq!(m.tier, Tier::Generic);
        assert_eq!(m.factor, 0.192);
    }

    #[test]
    fn subcategory_listing_excludes_default() {
        let table = builtin_table();
        let subs = table.list_subcategories("electricity");
        assert!(subs.contains(&"coal".to_string()));
        assert!(subs.contains(&"wind".to_string()));
        assert!(!subs.contains(&"default".to_string()));
        assert!(table.list_subcategories("water").is_empty());
    }
}
