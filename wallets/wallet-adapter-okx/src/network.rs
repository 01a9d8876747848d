/// Lowercase network name to Aptos chain id.
const NETWORK_CHAIN_IDS: &[(&str, u64)] = &[("mainnet", 1)];

pub fn chain_id(network: &str) -> Option<u64> {
    NETWORK_CHAIN_IDS
        .iter()
        .find(|(name, _)| *name == network)
        .map(|(_, chain_id)| *chain_id)
}
