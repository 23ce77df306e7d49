mod common;
pub use self::common::Query;

mod dividend;
pub use self::dividend::DividendQuery;

mod candle;
pub use self::candle::CandleQuery;
