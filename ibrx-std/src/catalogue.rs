//! Default callback argument table.
//!
//! Every callback the trading API wrapper can deliver, with its positional
//! argument names. The dispatch surface and the default type registry are
//! both derived from this table. `error` is absent: its overloads are
//! resolved by hand (see [`crate::overload`]).

use phf::phf_map;

const TICK_PRICE: &[&str] = &["tickerId", "field", "price", "canAutoExecute"];
const TICK_SIZE: &[&str] = &["tickerId", "field", "size"];
const TICK_OPTION_COMPUTATION: &[&str] = &[
    "tickerId",
    "field",
    "impliedVol",
    "delta",
    "optPrice",
    "pvDividend",
    "gamma",
    "vega",
    "theta",
    "undPrice",
];
const TICK_GENERIC: &[&str] = &["tickerId", "tickType", "value"];
const TICK_STRING: &[&str] = &["tickerId", "tickType", "value"];
const TICK_EFP: &[&str] = &[
    "tickerId",
    "tickType",
    "basisPoints",
    "formattedBasisPoints",
    "impliedFuture",
    "holdDays",
    "futureExpiry",
    "dividendImpact",
    "dividendsToExpiry",
];
const ORDER_STATUS: &[&str] = &[
    "orderId",
    "status",
    "filled",
    "remaining",
    "avgFillPrice",
    "permId",
    "parentId",
    "lastFillPrice",
    "clientId",
    "whyHeld",
];
const OPEN_ORDER: &[&str] = &["orderId", "contract", "order", "orderState"];
const NO_ARGS: &[&str] = &[];
const UPDATE_ACCOUNT_VALUE: &[&str] = &["key", "value", "currency", "accountName"];
const UPDATE_PORTFOLIO: &[&str] = &[
    "contract",
    "position",
    "marketPrice",
    "marketValue",
    "averageCost",
    "unrealizedPNL",
    "realizedPNL",
    "accountName",
];
const UPDATE_ACCOUNT_TIME: &[&str] = &["timeStamp"];
const ACCOUNT_DOWNLOAD_END: &[&str] = &["accountName"];
const NEXT_VALID_ID: &[&str] = &["orderId"];
const CONTRACT_DETAILS: &[&str] = &["reqId", "contractDetails"];
const REQ_ID: &[&str] = &["reqId"];
const EXEC_DETAILS: &[&str] = &["reqId", "contract", "execution"];
const UPDATE_MKT_DEPTH: &[&str] = &["tickerId", "position", "operation", "side", "price", "size"];
const UPDATE_MKT_DEPTH_L2: &[&str] = &[
    "tickerId",
    "position",
    "marketMaker",
    "operation",
    "side",
    "price",
    "size",
];
const UPDATE_NEWS_BULLETIN: &[&str] = &["msgId", "msgType", "message", "origExchange"];
const MANAGED_ACCOUNTS: &[&str] = &["accountsList"];
const RECEIVE_FA: &[&str] = &["faDataType", "xml"];
const HISTORICAL_DATA: &[&str] = &[
    "reqId", "date", "open", "high", "low", "close", "volume", "count", "WAP", "hasGaps",
];
const SCANNER_PARAMETERS: &[&str] = &["xml"];
const SCANNER_DATA: &[&str] = &[
    "reqId",
    "rank",
    "contractDetails",
    "distance",
    "benchmark",
    "projection",
    "legsStr",
];
const REALTIME_BAR: &[&str] = &[
    "reqId", "time", "open", "high", "low", "close", "volume", "wap", "count",
];
const CURRENT_TIME: &[&str] = &["time"];
const FUNDAMENTAL_DATA: &[&str] = &["reqId", "data"];
const DELTA_NEUTRAL_VALIDATION: &[&str] = &["reqId", "underComp"];
const MARKET_DATA_TYPE: &[&str] = &["reqId", "marketDataType"];
const COMMISSION_REPORT: &[&str] = &["commissionReport"];

/// Callback name to ordered argument names.
pub static WRAPPER_METHODS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "tickPrice" => TICK_PRICE,
    "tickSize" => TICK_SIZE,
    "tickOptionComputation" => TICK_OPTION_COMPUTATION,
    "tickGeneric" => TICK_GENERIC,
    "tickString" => TICK_STRING,
    "tickEFP" => TICK_EFP,
    "orderStatus" => ORDER_STATUS,
    "openOrder" => OPEN_ORDER,
    "openOrderEnd" => NO_ARGS,
    "updateAccountValue" => UPDATE_ACCOUNT_VALUE,
    "updatePortfolio" => UPDATE_PORTFOLIO,
    "updateAccountTime" => UPDATE_ACCOUNT_TIME,
    "accountDownloadEnd" => ACCOUNT_DOWNLOAD_END,
    "nextValidId" => NEXT_VALID_ID,
    "contractDetails" => CONTRACT_DETAILS,
    "bondContractDetails" => CONTRACT_DETAILS,
    "contractDetailsEnd" => REQ_ID,
    "execDetails" => EXEC_DETAILS,
    "execDetailsEnd" => REQ_ID,
    "updateMktDepth" => UPDATE_MKT_DEPTH,
    "updateMktDepthL2" => UPDATE_MKT_DEPTH_L2,
    "updateNewsBulletin" => UPDATE_NEWS_BULLETIN,
    "managedAccounts" => MANAGED_ACCOUNTS,
    "receiveFA" => RECEIVE_FA,
    "historicalData" => HISTORICAL_DATA,
    "scannerParameters" => SCANNER_PARAMETERS,
    "scannerData" => SCANNER_DATA,
    "scannerDataEnd" => REQ_ID,
    "realtimeBar" => REALTIME_BAR,
    "currentTime" => CURRENT_TIME,
    "fundamentalData" => FUNDAMENTAL_DATA,
    "deltaNeutralValidation" => DELTA_NEUTRAL_VALIDATION,
    "tickSnapshotEnd" => REQ_ID,
    "marketDataType" => MARKET_DATA_TYPE,
    "commissionReport" => COMMISSION_REPORT,
    "connectionClosed" => NO_ARGS,
};

/// Fields of the canonical `error` message.
pub const ERROR_FIELDS: [&str; 3] = ["id", "errorCode", "errorMsg"];

/// Iterate the default table as `(name, argument names)` pairs.
pub fn wrapper_methods() -> impl Iterator<Item = (&'static str, &'static [&'static str])> {
    WRAPPER_METHODS.entries().map(|(name, args)| (*name, *args))
}

/// Declared message type name for a callback: `tickPrice` becomes `TickPrice`.
pub fn type_name(callback: &str) -> String {
    let mut chars = callback.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name() {
        assert_eq!(type_name("tickPrice"), "TickPrice");
        assert_eq!(type_name("updateMktDepthL2"), "UpdateMktDepthL2");
        assert_eq!(type_name(""), "");
    }

    #[test]
    fn test_table_lookup() {
        assert_eq!(WRAPPER_METHODS.get("tickSize"), Some(&TICK_SIZE));
        assert_eq!(WRAPPER_METHODS.get("connectionClosed").map(|a| a.len()), Some(0));
        assert!(WRAPPER_METHODS.get("error").is_none());
        assert_eq!(wrapper_methods().count(), WRAPPER_METHODS.len());
    }
}
