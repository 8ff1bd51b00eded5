//! Demo catalog used when the service runs without a database.

use chrono::{DateTime, Utc};

use roofline_catalog::{BlogPost, Category, Location, PricingRecord, SolutionId};

struct Tier {
    id: &'static str,
    title: &'static str,
    category: Category,
    cash: f64,
    installments: f64,
    rank: i32,
    warranty_years: u32,
    description: &'static str,
}

const TIERS: &[Tier] = &[
    Tier {
        id: "manta-asfaltica",
        title: "Manta Asfáltica",
        category: Category::Concrete,
        cash: 89.9,
        installments: 107.9,
        rank: 1,
        warranty_years: 5,
        description: "Manta asfáltica aluminizada aplicada a maçarico sobre laje.",
    },
    Tier {
        id: "manta-liquida",
        title: "Manta Líquida",
        category: Category::Concrete,
        cash: 119.9,
        installments: 143.9,
        rank: 2,
        warranty_years: 8,
        description: "Membrana acrílica elástica em três demãos com tela de reforço.",
    },
    Tier {
        id: "telhado-termico",
        title: "Impermeabilização de Telhado",
        category: Category::Sheet,
        cash: 69.9,
        installments: 83.9,
        rank: 3,
        warranty_years: 5,
        description: "Revestimento térmico para telhas metálicas e de fibrocimento.",
    },
    Tier {
        id: "sistema-premium",
        title: "Sistema Premium",
        category: Category::Both,
        cash: 159.9,
        installments: 191.9,
        rank: 4,
        warranty_years: 12,
        description: "Poliuretano projetado com manta de reforço e pintura refletiva.",
    },
];

/// Regional price multipliers over the Campinas base.
const CITIES: &[(&str, f64)] = &[("Campinas", 1.0), ("Sorocaba", 1.05), ("Jundiaí", 1.03)];

pub fn pricing() -> Vec<PricingRecord> {
    let mut rows = Vec::with_capacity(TIERS.len() * CITIES.len());

    for (city, factor) in CITIES {
        for tier in TIERS {
            let Ok(internal_id) = SolutionId::parse(tier.id) else {
                continue;
            };
            rows.push(PricingRecord {
                internal_id,
                title: tier.title.to_string(),
                category: tier.category,
                price_per_area_cash: tier.cash * factor,
                price_per_area_installments: tier.installments * factor,
                order_rank: tier.rank,
                city: (*city).to_string(),
                description: Some(tier.description.to_string()),
                warranty_years: Some(tier.warranty_years),
                active: true,
            });
        }
    }

    rows
}

pub fn locations() -> Vec<Location> {
    let branch = |slug: &str, city: &str, state: &str, address: &str, phone: &str, coords: (f64, f64)| {
        Location {
            slug: slug.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
            whatsapp: Some(phone.chars().filter(char::is_ascii_digit).collect()),
            latitude: Some(coords.0),
            longitude: Some(coords.1),
            active: true,
        }
    };

    vec![
        branch(
            "campinas",
            "Campinas",
            "SP",
            "Av. Norte-Sul, 1500 - Cambuí",
            "(19) 3232-1000",
            (-22.8920, -47.0550),
        ),
        branch(
            "sorocaba",
            "Sorocaba",
            "SP",
            "Rua XV de Novembro, 420 - Centro",
            "(15) 3211-2000",
            (-23.5015, -47.4526),
        ),
        branch(
            "jundiai",
            "Jundiaí",
            "SP",
            "Av. Jundiaí, 980 - Anhangabaú",
            "(11) 4521-3000",
            (-23.1857, -46.8978),
        ),
        branch(
            "belo-horizonte",
            "Belo Horizonte",
            "MG",
            "Av. do Contorno, 6100 - Savassi",
            "(31) 3281-4000",
            (-19.9380, -43.9340),
        ),
    ]
}

pub fn posts() -> Vec<BlogPost> {
    let post = |slug: &str, title: &str, excerpt: &str, published: Option<&str>, tags: &[&str]| {
        BlogPost {
            slug: slug.to_string(),
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            body: format!("{excerpt}\n\nFale com a nossa equipe para uma vistoria sem custo."),
            cover_url: None,
            published_at: published.and_then(parse_timestamp),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    };

    vec![
        post(
            "infiltracao-na-laje",
            "Infiltração na laje: como identificar",
            "Manchas, bolor e tinta descascando são os primeiros sinais.",
            Some("2025-03-10T12:00:00Z"),
            &["laje", "infiltracao"],
        ),
        post(
            "manta-asfaltica-ou-liquida",
            "Manta asfáltica ou manta líquida?",
            "Comparamos durabilidade, custo por m² e manutenção.",
            Some("2025-05-22T12:00:00Z"),
            &["manta", "comparativo"],
        ),
        post(
            "telhado-metalico-no-verao",
            "Telhado metálico no verão",
            "Revestimentos térmicos reduzem a temperatura interna.",
            Some("2025-08-04T12:00:00Z"),
            &["telhado", "conforto-termico"],
        ),
        post(
            "garantia-estendida",
            "Garantia estendida em todos os sistemas",
            "Rascunho.",
            None,
            &[],
        ),
    ]
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_city_gets_every_tier() {
        let rows = pricing();
        assert_eq!(rows.len(), TIERS.len() * CITIES.len());
        assert!(rows.iter().all(|r| r.price_per_area_cash > 0.0));
    }

    #[test]
    fn seeded_posts_parse_their_dates() {
        let posts = posts();
        assert_eq!(posts.iter().filter(|p| p.published_at.is_some()).count(), 3);
    }
}
