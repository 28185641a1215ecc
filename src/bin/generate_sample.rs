//! Write a plausible small CSV per dataset so the dashboard can be exercised
//! without the real statistical extracts. Deterministic: same seed, same
//! files.

use std::path::Path;

const COUNTRIES: [&str; 8] = [
    "India",
    "Russia",
    "China",
    "Canada",
    "United States",
    "Brazil",
    "Norway",
    "Japan",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform float in [low, high).
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

fn write_csv(dir: &Path, name: &str, headers: &[&str], rows: &[Vec<String>]) {
    let path = dir.join(name);
    let mut writer = csv::Writer::from_path(&path).expect("Failed to create CSV file");
    writer.write_record(headers).expect("Failed to write header");
    for row in rows {
        writer.write_record(row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");
    println!("Wrote {} rows to {}", rows.len(), path.display());
}

fn round2(v: f64) -> String {
    format!("{:.2}", v)
}

fn main() {
    let dir = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());
    let dir = Path::new(&dir);
    std::fs::create_dir_all(dir).expect("Failed to create data directory");

    let mut rng = SimpleRng::new(42);

    // Mobile subscriptions per 100 inhabitants, 2008–2022 so the loader's
    // 2010–2020 window has something to cut.
    let mut rows = Vec::new();
    for country in COUNTRIES {
        let base = rng.range(40.0, 80.0);
        for year in 2008..=2022 {
            let value = base + (year - 2008) as f64 * rng.range(2.0, 5.0);
            rows.push(vec![country.to_string(), year.to_string(), round2(value)]);
        }
    }
    write_csv(dir, "mobile-subscriptions.csv", &["Country or Area", "Year", "Value"], &rows);

    // GDP per capita; a few blank values exercise the drop step.
    let mut rows = Vec::new();
    for country in COUNTRIES {
        for year in 2019..=2021 {
            let value = if rng.next_f64() < 0.06 {
                String::new()
            } else {
                round2(rng.range(2000.0, 70000.0))
            };
            rows.push(vec![country.to_string(), year.to_string(), value]);
        }
    }
    write_csv(dir, "gdp_per_capita.csv", &["Country or Area", "Year", "Value"], &rows);

    // Population projections with non-medium variants to filter out.
    let mut rows = Vec::new();
    for country in COUNTRIES {
        for variant in ["Low", "Medium", "High"] {
            let value = rng.range(5_000.0, 1_400_000.0);
            rows.push(vec![
                country.to_string(),
                "2020".to_string(),
                variant.to_string(),
                round2(value),
            ]);
        }
    }
    write_csv(dir, "Population.csv", &["Country or Area", "Year(s)", "Variant", "Value"], &rows);

    // Air transport: freight and passengers, with map coordinates.
    let coords: [(&str, f64, f64); 5] = [
        ("India", 20.59, 78.96),
        ("Russia", 61.52, 105.32),
        ("China", 35.86, 104.20),
        ("Canada", 56.13, -106.35),
        ("United States", 37.09, -95.71),
    ];
    let mut freight = Vec::new();
    let mut passengers = Vec::new();
    for (country, lat, lon) in coords {
        for year in 2019..=2021 {
            freight.push(vec![
                country.to_string(),
                year.to_string(),
                round2(rng.range(500.0, 45000.0)),
                round2(lat),
                round2(lon),
            ]);
            passengers.push(vec![
                country.to_string(),
                year.to_string(),
                round2(rng.range(1.0e6, 9.0e8)),
                round2(lat),
                round2(lon),
            ]);
        }
    }
    let transport_headers = ["Country or Area", "Year", "Value", "Latitude", "Longitude"];
    write_csv(dir, "freight.csv", &transport_headers, &freight);
    write_csv(dir, "passengers.csv", &transport_headers, &passengers);

    // Electricity production, long format: one row per country × transaction.
    let mut rows = Vec::new();
    for country in COUNTRIES {
        for kind in ["solar", "thermal", "wind", "nuclear"] {
            let label = format!("Electricity - total {kind} production");
            let mut row = vec![country.to_string(), label];
            for _year in 2018..=2021 {
                row.push(round2(rng.range(0.0, 900.0)));
            }
            rows.push(row);
        }
    }
    write_csv(
        dir,
        "electricity.csv",
        &["Country", "Commodity - Transaction", "2018", "2019", "2020", "2021"],
        &rows,
    );

    // Business extent of disclosure, one value per country per year.
    let mut rows = Vec::new();
    for country in COUNTRIES {
        for year in 2005..=2019 {
            rows.push(vec![
                country.to_string(),
                year.to_string(),
                format!("{}", (rng.next_u64() % 11)),
            ]);
        }
    }
    write_csv(dir, "disclosure_extent.csv", &["Country", "Year", "Value"], &rows);

    // State-of-children indicators for the parallel coordinates chart.
    let mut rows = Vec::new();
    for country in COUNTRIES {
        rows.push(vec![
            country.to_string(),
            round2(rng.range(2.0, 60.0)),
            round2(rng.range(60.0, 100.0)),
            round2(rng.range(55.0, 99.0)),
            round2(rng.range(1.0, 35.0)),
        ]);
    }
    write_csv(
        dir,
        "Childrens_state.csv",
        &[
            "Country",
            "Infant Mortality",
            "School Enrollment",
            "Immunization",
            "Underweight",
        ],
        &rows,
    );

    // Expenditure as % of GDP; two rows per (country, year, category) so the
    // grouping has something to sum.
    let mut rows = Vec::new();
    for country in COUNTRIES.iter().take(5) {
        for year in [2019, 2020] {
            for category in ["Health", "Education", "Military"] {
                for _ in 0..2 {
                    rows.push(vec![
                        country.to_string(),
                        year.to_string(),
                        category.to_string(),
                        round2(rng.range(0.5, 5.0)),
                    ]);
                }
            }
        }
    }
    write_csv(
        dir,
        "expenditure.csv",
        &["Country", "Year", "Category", "Expenditure (% of GDP)"],
        &rows,
    );

    // Healthcare expenditure vs life expectancy, 2010–2020 per country.
    let mut rows = Vec::new();
    for country in COUNTRIES {
        let mut healthcare = rng.range(400.0, 6000.0);
        let mut life = rng.range(65.0, 80.0);
        for year in 2010..=2020 {
            healthcare += rng.range(-150.0, 400.0);
            life += rng.range(-0.3, 0.6);
            rows.push(vec![
                country.to_string(),
                year.to_string(),
                round2(healthcare),
                round2(life),
            ]);
        }
    }
    write_csv(
        dir,
        "difference.csv",
        &["Country", "Year", "Healthcare expenditure", "Life Expectency"],
        &rows,
    );

    // Diplomatic posts: one row per host city, one column per focus country.
    let cities = [
        "Ottawa", "Beijing", "New Delhi", "Moscow", "Washington", "Geneva", "Mumbai",
        "Shanghai", "Vancouver", "St. Petersburg",
    ];
    let posts = ["Embassy", "Consulate-General", "High Commission", "", ""];
    let mut rows = Vec::new();
    for city in cities {
        let mut row = vec![city.to_string()];
        for _country in ["Canada", "China", "India", "Russia", "United States"] {
            row.push(rng.pick(&posts).to_string());
        }
        rows.push(row);
    }
    write_csv(
        dir,
        "Book2.csv",
        &["City", "Canada", "China", "India", "Russia", "United States"],
        &rows,
    );

    // Commodity trade in USD; occasional blanks exercise the coercion drop.
    let mut rows = Vec::new();
    for country in COUNTRIES {
        for year in 2011..=2020 {
            for commodity in ["Cereals", "Machinery", "Fuels"] {
                let value = if rng.next_f64() < 0.05 {
                    String::new()
                } else {
                    round2(rng.range(1.0e6, 5.0e10))
                };
                rows.push(vec![
                    country.to_string(),
                    year.to_string(),
                    commodity.to_string(),
                    value,
                ]);
            }
        }
    }
    write_csv(
        dir,
        "Trade.csv",
        &["Country or Area", "Year", "Commodity", "Trade (USD)"],
        &rows,
    );

    // Tourism revenue: country → region → tourism type.
    let regions: [(&str, [&str; 2]); 4] = [
        ("India", ["Kerala", "Rajasthan"]),
        ("Canada", ["Ontario", "Quebec"]),
        ("Japan", ["Kansai", "Kanto"]),
        ("Brazil", ["Rio de Janeiro", "Bahia"]),
    ];
    let mut rows = Vec::new();
    for (country, country_regions) in regions {
        for region in country_regions {
            for tourism_type in ["Inbound", "Outbound", "Domestic"] {
                rows.push(vec![
                    country.to_string(),
                    region.to_string(),
                    tourism_type.to_string(),
                    round2(rng.range(0.5, 30.0)),
                ]);
            }
        }
    }
    write_csv(
        dir,
        "tourism.csv",
        &["Country", "Region", "Tourism Type", "Tourist Revenue (billion USD)"],
        &rows,
    );
}
