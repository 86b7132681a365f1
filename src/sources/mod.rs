pub mod binance;
pub mod finnhub;
pub mod yahoo;

pub use binance::BinanceClient;
pub use finnhub::FinnhubClient;
pub use yahoo::YahooFinanceClient;
