// src/chain.rs

/// Identifiers one network carries at each provider
#[derive(Debug, PartialEq, Eq)]
pub struct Chain {
    pub name: &'static str,
    pub covalent_id: u64,
    pub bitquery_network: &'static str,
}

pub const DEFAULT_ALIAS: &str = "eth";

static ETHEREUM: Chain = Chain { name: "ethereum", covalent_id: 1, bitquery_network: "eth" };
static POLYGON: Chain = Chain { name: "polygon", covalent_id: 137, bitquery_network: "matic" };
static BSC: Chain = Chain { name: "bsc", covalent_id: 56, bitquery_network: "bsc" };
static BASE: Chain = Chain { name: "base", covalent_id: 8453, bitquery_network: "base" };
static ARBITRUM: Chain = Chain { name: "arbitrum", covalent_id: 42161, bitquery_network: "arbitrum" };
static OPTIMISM: Chain = Chain { name: "optimism", covalent_id: 10, bitquery_network: "optimism" };

static ALIASES: &[(&str, &Chain)] = &[
    ("eth", &ETHEREUM),
    ("ethereum", &ETHEREUM),
    ("polygon", &POLYGON),
    ("matic", &POLYGON),
    ("bsc", &BSC),
    ("base", &BASE),
    ("arbitrum", &ARBITRUM),
    ("optimism", &OPTIMISM),
];

/// Look up a lowercased alias. Anything not in the table is Ethereum.
pub fn resolve(alias: &str) -> &'static Chain {
    ALIASES
        .iter()
        .find(|(name, _)| *name == alias)
        .map(|(_, chain)| *chain)
        .unwrap_or(&ETHEREUM)
}

/// Normalize the raw `chain` query value, defaulting to `eth`.
pub fn alias_from_query(raw: Option<&str>) -> String {
    raw.map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_ALIAS.to_string())
}
