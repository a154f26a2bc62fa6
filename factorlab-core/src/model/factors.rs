//! The 43-factor reference table.
//!
//! Factors are immutable reference data: the scoring engine only reads their
//! weights, in table order. Weights are percentages and sum to 100.

use serde::Serialize;
use std::fmt;

/// Number of factors in the model.
pub const FACTOR_COUNT: usize = 43;

/// Broad family a factor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FactorGroup {
    Momentum,
    Value,
    Quality,
    Growth,
    Volatility,
    Liquidity,
    Sentiment,
    Technical,
}

impl fmt::Display for FactorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One weighted model input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Factor {
    pub id: u8,
    pub name: &'static str,
    pub definition: &'static str,
    /// Weight as a percentage of the whole model.
    pub weight_pct: f64,
    pub group: FactorGroup,
}

impl Factor {
    /// Weight as a fraction of 1.
    pub fn weight_fraction(&self) -> f64 {
        self.weight_pct / 100.0
    }
}

/// The model's factor table, in scoring order.
pub fn factor_table() -> &'static [Factor] {
    &FACTORS
}

/// Sum of all factor weights, in percent.
pub fn total_weight_pct() -> f64 {
    FACTORS.iter().map(|f| f.weight_pct).sum()
}

static FACTORS: [Factor; FACTOR_COUNT] = [
    Factor {
        id: 1,
        name: "Price Momentum 1M",
        definition: "Total return over the trailing 21 trading days",
        weight_pct: 3.2,
        group: FactorGroup::Momentum,
    },
    Factor {
        id: 2,
        name: "Price Momentum 3M",
        definition: "Total return over the trailing 63 trading days",
        weight_pct: 3.4,
        group: FactorGroup::Momentum,
    },
    Factor {
        id: 3,
        name: "Price Momentum 12-1M",
        definition: "Twelve-month return excluding the most recent month",
        weight_pct: 4.0,
        group: FactorGroup::Momentum,
    },
    Factor {
        id: 4,
        name: "Earnings Revision Momentum",
        definition: "Net upward revisions to forward EPS estimates",
        weight_pct: 3.4,
        group: FactorGroup::Momentum,
    },
    Factor {
        id: 5,
        name: "Relative Strength vs Sector",
        definition: "Return spread against the sector median",
        weight_pct: 2.6,
        group: FactorGroup::Momentum,
    },
    Factor {
        id: 6,
        name: "52-Week High Proximity",
        definition: "Price as a fraction of its 52-week high",
        weight_pct: 2.2,
        group: FactorGroup::Momentum,
    },
    Factor {
        id: 7,
        name: "Earnings Yield",
        definition: "Trailing EPS divided by price",
        weight_pct: 3.1,
        group: FactorGroup::Value,
    },
    Factor {
        id: 8,
        name: "Book-to-Price",
        definition: "Book equity per share divided by price",
        weight_pct: 2.1,
        group: FactorGroup::Value,
    },
    Factor {
        id: 9,
        name: "Free Cash Flow Yield",
        definition: "Trailing free cash flow divided by market value",
        weight_pct: 3.4,
        group: FactorGroup::Value,
    },
    Factor {
        id: 10,
        name: "EV/EBITDA Inverse",
        definition: "EBITDA divided by enterprise value",
        weight_pct: 2.4,
        group: FactorGroup::Value,
    },
    Factor {
        id: 11,
        name: "Dividend Yield",
        definition: "Trailing dividends per share divided by price",
        weight_pct: 1.6,
        group: FactorGroup::Value,
    },
    Factor {
        id: 12,
        name: "Sales-to-Price",
        definition: "Trailing revenue per share divided by price",
        weight_pct: 1.8,
        group: FactorGroup::Value,
    },
    Factor {
        id: 13,
        name: "Return on Equity",
        definition: "Net income divided by average shareholder equity",
        weight_pct: 3.2,
        group: FactorGroup::Quality,
    },
    Factor {
        id: 14,
        name: "Return on Invested Capital",
        definition: "NOPAT divided by invested capital",
        weight_pct: 3.5,
        group: FactorGroup::Quality,
    },
    Factor {
        id: 15,
        name: "Gross Margin Stability",
        definition: "Inverse volatility of quarterly gross margin",
        weight_pct: 2.0,
        group: FactorGroup::Quality,
    },
    Factor {
        id: 16,
        name: "Accruals Ratio",
        definition: "Negative of balance-sheet accruals scaled by assets",
        weight_pct: 1.9,
        group: FactorGroup::Quality,
    },
    Factor {
        id: 17,
        name: "Leverage",
        definition: "Negative of net debt to EBITDA",
        weight_pct: 2.1,
        group: FactorGroup::Quality,
    },
    Factor {
        id: 18,
        name: "Interest Coverage",
        definition: "EBIT divided by interest expense",
        weight_pct: 1.7,
        group: FactorGroup::Quality,
    },
    Factor {
        id: 19,
        name: "Revenue Growth",
        definition: "Year-over-year revenue growth",
        weight_pct: 3.0,
        group: FactorGroup::Growth,
    },
    Factor {
        id: 20,
        name: "EPS Growth",
        definition: "Year-over-year diluted EPS growth",
        weight_pct: 3.2,
        group: FactorGroup::Growth,
    },
    Factor {
        id: 21,
        name: "Forward EPS Growth",
        definition: "Consensus next-year EPS growth",
        weight_pct: 2.5,
        group: FactorGroup::Growth,
    },
    Factor {
        id: 22,
        name: "Capex Intensity Trend",
        definition: "Change in capital expenditure relative to sales",
        weight_pct: 1.5,
        group: FactorGroup::Growth,
    },
    Factor {
        id: 23,
        name: "R&D Intensity",
        definition: "Research spending divided by revenue",
        weight_pct: 1.6,
        group: FactorGroup::Growth,
    },
    Factor {
        id: 24,
        name: "Low Realized Volatility",
        definition: "Negative of 63-day realized volatility",
        weight_pct: 2.3,
        group: FactorGroup::Volatility,
    },
    Factor {
        id: 25,
        name: "Low Beta",
        definition: "Negative of 252-day beta to the market",
        weight_pct: 2.0,
        group: FactorGroup::Volatility,
    },
    Factor {
        id: 26,
        name: "Downside Deviation",
        definition: "Negative of semi-deviation of daily returns",
        weight_pct: 1.9,
        group: FactorGroup::Volatility,
    },
    Factor {
        id: 27,
        name: "Max Drawdown 1Y",
        definition: "Negative of the deepest one-year drawdown",
        weight_pct: 1.8,
        group: FactorGroup::Volatility,
    },
    Factor {
        id: 28,
        name: "Idiosyncratic Volatility",
        definition: "Negative of residual volatility after market beta",
        weight_pct: 1.7,
        group: FactorGroup::Volatility,
    },
    Factor {
        id: 29,
        name: "Average Dollar Volume",
        definition: "Log of 20-day average traded value",
        weight_pct: 2.2,
        group: FactorGroup::Liquidity,
    },
    Factor {
        id: 30,
        name: "Turnover Trend",
        definition: "Change in share turnover over 3 months",
        weight_pct: 1.6,
        group: FactorGroup::Liquidity,
    },
    Factor {
        id: 31,
        name: "Bid-Ask Spread",
        definition: "Negative of average quoted spread",
        weight_pct: 1.8,
        group: FactorGroup::Liquidity,
    },
    Factor {
        id: 32,
        name: "Amihud Illiquidity",
        definition: "Negative of absolute return per unit volume",
        weight_pct: 1.5,
        group: FactorGroup::Liquidity,
    },
    Factor {
        id: 33,
        name: "Analyst Rating Drift",
        definition: "Change in mean analyst recommendation",
        weight_pct: 2.4,
        group: FactorGroup::Sentiment,
    },
    Factor {
        id: 34,
        name: "Short Interest",
        definition: "Negative of short interest as a fraction of float",
        weight_pct: 2.2,
        group: FactorGroup::Sentiment,
    },
    Factor {
        id: 35,
        name: "Insider Net Buying",
        definition: "Net insider purchases over 6 months",
        weight_pct: 1.9,
        group: FactorGroup::Sentiment,
    },
    Factor {
        id: 36,
        name: "Institutional Ownership Change",
        definition: "Quarterly change in institutional holdings",
        weight_pct: 2.0,
        group: FactorGroup::Sentiment,
    },
    Factor {
        id: 37,
        name: "News Sentiment",
        definition: "Average tone of company news over 30 days",
        weight_pct: 2.3,
        group: FactorGroup::Sentiment,
    },
    Factor {
        id: 38,
        name: "RSI Mean Reversion",
        definition: "Distance of 14-day RSI from 50",
        weight_pct: 2.1,
        group: FactorGroup::Technical,
    },
    Factor {
        id: 39,
        name: "MACD Signal",
        definition: "MACD line minus its signal line",
        weight_pct: 2.4,
        group: FactorGroup::Technical,
    },
    Factor {
        id: 40,
        name: "Moving Average Spread",
        definition: "50-day over 200-day moving average ratio",
        weight_pct: 3.0,
        group: FactorGroup::Technical,
    },
    Factor {
        id: 41,
        name: "Bollinger Position",
        definition: "Position of price within 20-day Bollinger bands",
        weight_pct: 1.9,
        group: FactorGroup::Technical,
    },
    Factor {
        id: 42,
        name: "Volume Breakout",
        definition: "Volume relative to its 50-day average on up days",
        weight_pct: 2.0,
        group: FactorGroup::Technical,
    },
    Factor {
        id: 43,
        name: "Gap Persistence",
        definition: "Share of opening gaps not filled within the session",
        weight_pct: 1.6,
        group: FactorGroup::Technical,
    },
];
