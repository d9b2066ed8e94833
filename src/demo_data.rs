//! Sample token catalog for seeding a fresh store.

use crate::models::Token;

/// (name, symbol) pairs covering major coins, DeFi tokens and stablecoins.
pub const SAMPLE_TOKENS: &[(&str, &str)] = &[
    // Majors
    ("Bitcoin", "BTC"),
    ("Ethereum", "ETH"),
    ("Binance Coin", "BNB"),
    ("Solana", "SOL"),
    ("Cardano", "ADA"),
    ("XRP", "XRP"),
    ("Polkadot", "DOT"),
    ("Dogecoin", "DOGE"),
    ("Avalanche", "AVAX"),
    ("Shiba Inu", "SHIB"),
    ("Polygon", "MATIC"),
    ("Litecoin", "LTC"),
    ("Chainlink", "LINK"),
    ("Uniswap", "UNI"),
    ("Bitcoin Cash", "BCH"),
    ("Stellar", "XLM"),
    ("Cosmos", "ATOM"),
    ("Monero", "XMR"),
    ("Ethereum Classic", "ETC"),
    ("Filecoin", "FIL"),
    // DeFi
    ("Compound", "COMP"),
    ("Aave", "AAVE"),
    ("Maker", "MKR"),
    ("PancakeSwap", "CAKE"),
    ("SushiSwap", "SUSHI"),
    ("Curve DAO Token", "CRV"),
    ("Synthetix", "SNX"),
    ("yearn.finance", "YFI"),
    ("Balancer", "BAL"),
    ("1inch", "1INCH"),
    // Stablecoins
    ("Tether", "USDT"),
    ("USD Coin", "USDC"),
    ("Binance USD", "BUSD"),
    ("Dai", "DAI"),
    ("TrueUSD", "TUSD"),
    // Others
    ("Tron", "TRX"),
    ("The Sandbox", "SAND"),
    ("Decentraland", "MANA"),
    ("Axie Infinity", "AXS"),
    ("Basic Attention Token", "BAT"),
];

/// The sample catalog as unprepared tokens.
pub fn sample_tokens() -> Vec<Token> {
    SAMPLE_TOKENS
        .iter()
        .map(|(name, symbol)| Token::new(*name, *symbol))
        .collect()
}
