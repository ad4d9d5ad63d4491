mod coin;
mod price;

pub use coin::{CoinDetails, CoinImage, CoinRecord, MarketSnapshot, TrendingCoin};
pub use price::{PricePoint, PriceSeries, TimeRange};
