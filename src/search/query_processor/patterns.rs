use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::catalog::Category;

/// What a category keyword resolves to. `Many` fans out into one query part per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMatch {
    Single(Category),
    Many(&'static [Category]),
}

impl CategoryMatch {
    pub fn categories(&self) -> &[Category] {
        match self {
            Self::Single(category) => std::slice::from_ref(category),
            Self::Many(categories) => categories,
        }
    }
}

const VILLAGES: &[Category] = &[Category::LimestoneVillages, Category::SchistVillages];

/// Keyword → category, scanned in order; the first keyword contained in the segment wins.
/// Specific village types sit before the generic village terms.
pub static CATEGORY_KEYWORDS: &[(&str, CategoryMatch)] = &[
    ("xisto", CategoryMatch::Single(Category::SchistVillages)),
    ("schist", CategoryMatch::Single(Category::SchistVillages)),
    ("calcário", CategoryMatch::Single(Category::LimestoneVillages)),
    ("calcario", CategoryMatch::Single(Category::LimestoneVillages)),
    ("limestone", CategoryMatch::Single(Category::LimestoneVillages)),
    ("restaurante", CategoryMatch::Single(Category::Restaurants)),
    ("restaurant", CategoryMatch::Single(Category::Restaurants)),
    ("comer", CategoryMatch::Single(Category::Restaurants)),
    ("almoçar", CategoryMatch::Single(Category::Restaurants)),
    ("jantar", CategoryMatch::Single(Category::Restaurants)),
    ("museu", CategoryMatch::Single(Category::Museums)),
    ("museum", CategoryMatch::Single(Category::Museums)),
    ("castelo", CategoryMatch::Single(Category::Castles)),
    ("castle", CategoryMatch::Single(Category::Castles)),
    ("praia", CategoryMatch::Single(Category::RiverBeaches)),
    ("beach", CategoryMatch::Single(Category::RiverBeaches)),
    ("aldeia", CategoryMatch::Many(VILLAGES)),
    ("village", CategoryMatch::Many(VILLAGES)),
    ("hiking", CategoryMatch::Single(Category::Trails)),
    ("caminhada", CategoryMatch::Single(Category::Trails)),
    ("percurso", CategoryMatch::Single(Category::Trails)),
    ("trilho", CategoryMatch::Single(Category::Trails)),
    ("trail", CategoryMatch::Single(Category::Trails)),
    ("miradouro", CategoryMatch::Single(Category::Viewpoints)),
    ("viewpoint", CategoryMatch::Single(Category::Viewpoints)),
];


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GazetteerEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl GazetteerEntry {
    pub fn matches(&self, text: &str) -> bool {
        text.contains(self.name) || self.aliases.iter().any(|alias| text.contains(alias))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name)
            .chain(self.aliases.iter().copied())
            .flat_map(str::split_whitespace)
    }
}

/// Known place names of the region, scanned in order.
pub static GAZETTEER: &[GazetteerEntry] = &[
    GazetteerEntry { name: "coimbra", aliases: &[] },
    GazetteerEntry { name: "lousã", aliases: &["lousa"] },
    GazetteerEntry { name: "penela", aliases: &[] },
    GazetteerEntry { name: "miranda do corvo", aliases: &[] },
    GazetteerEntry { name: "vila nova de poiares", aliases: &["poiares"] },
    GazetteerEntry { name: "góis", aliases: &["gois"] },
    GazetteerEntry { name: "arganil", aliases: &[] },
    GazetteerEntry { name: "oliveira do hospital", aliases: &[] },
    GazetteerEntry { name: "tábua", aliases: &["tabua"] },
    GazetteerEntry { name: "pampilhosa da serra", aliases: &[] },
];


pub static PROXIMITY_PHRASES: &[&str] = &[
    "perto de mim",
    "perto daqui",
    "aqui perto",
    "próximo de mim",
    "proximo de mim",
    "próximos de mim",
    "proximos de mim",
    "mais perto",
    "mais próximo",
    "mais proximo",
    "nas proximidades",
    "near me",
    "nearby",
    "close to me",
    "around me",
    "closest",
    "nearest",
];

lazy_static! {
    pub static ref NUMBER_WORDS: HashMap<&'static str, usize> = {
        let mut m = HashMap::new();
        for (word, value) in [
            ("um", 1), ("uma", 1), ("dois", 2), ("duas", 2), ("três", 3), ("tres", 3),
            ("quatro", 4), ("cinco", 5), ("seis", 6), ("sete", 7), ("oito", 8),
            ("nove", 9), ("dez", 10),
            ("one", 1), ("two", 2), ("three", 3), ("four", 4), ("five", 5),
            ("six", 6), ("seven", 7), ("eight", 8), ("nine", 9), ("ten", 10),
        ] {
            m.insert(word, value);
        }
        m
    };

    static ref DIGITS: Regex = Regex::new(r"[0-9]+").expect("static digit pattern");

    static ref GAZETTEER_TOKENS: Vec<&'static str> =
        GAZETTEER.iter().flat_map(GazetteerEntry::tokens).collect();

    static ref PROXIMITY_TOKENS: Vec<&'static str> =
        PROXIMITY_PHRASES.iter().flat_map(|phrase| phrase.split_whitespace()).collect();
}

/// Requested result count: a digit run first, then a number word. Zero means "no quantity".
pub fn extract_quantity(segment: &str) -> Option<usize> {
    if let Some(digits) = DIGITS.find(segment) {
        return digits.as_str().parse::<usize>().ok().filter(|n| *n > 0);
    }

    segment
        .split_whitespace()
        .find_map(|token| NUMBER_WORDS.get(token).copied())
}

pub fn detect_nearby(segment: &str) -> bool {
    PROXIMITY_PHRASES.iter().any(|phrase| segment.contains(phrase))
}

pub fn match_location(segment: &str) -> Option<&'static GazetteerEntry> {
    GAZETTEER.iter().find(|entry| entry.matches(segment))
}

pub fn match_category(segment: &str) -> Option<(&'static str, CategoryMatch)> {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| segment.contains(keyword))
        .copied()
}

/// Free-text tokens for keyword mode: longer than three characters, not a place
/// name token, not part of a proximity phrase and not a number word.
pub fn keyword_tokens(segment: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for raw in segment.split_whitespace() {
        let token = raw.trim_matches(|c: char| !c.is_alphanumeric());
        if token.chars().count() <= 3 {
            continue;
        }
        if GAZETTEER_TOKENS.iter().any(|place| *place == token)
            || PROXIMITY_TOKENS.iter().any(|word| *word == token)
            || NUMBER_WORDS.contains_key(token)
        {
            continue;
        }
        if !keywords.iter().any(|existing| existing == token) {
            keywords.push(token.to_string());
        }
    }

    keywords
}
