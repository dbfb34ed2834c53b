pub const TRENDING_TOKENS: &str = r#"
query TrendingTokens($limit: Int!, $since: DateTime, $orderField: String!, $protocol: String!) {
  EVM(network: bsc) {
    DEXTradeByTokens(
      limit: {count: $limit}
      orderBy: {descendingByField: $orderField}
      where: {
        Trade: {Success: true, Dex: {ProtocolName: {is: $protocol}}}
        Block: {Time: {since: $since}}
      }
    ) {
      Trade {
        Currency {
          Name
          Symbol
          SmartContract
        }
      }
      volume_usd: sum(of: Trade_Side_AmountInUSD)
      trade_count: count
    }
  }
}
"#;

pub const CURVE_BALANCE: &str = r#"
query CurveBalance($tokenAddress: String!, $proxy: String!) {
  EVM(network: bsc, dataset: combined) {
    BalanceUpdates(
      where: {
        BalanceUpdate: {Address: {is: $proxy}}
        Currency: {SmartContract: {is: $tokenAddress}}
      }
    ) {
      Currency {
        Name
        Symbol
        SmartContract
      }
      balance: sum(of: BalanceUpdate_Amount)
      last_activity: maximum(of: Block_Time)
    }
  }
}
"#;

pub const CURVE_BALANCES: &str = r#"
query CurveBalances($proxy: String!, $limit: Int!) {
  EVM(network: bsc, dataset: combined) {
    BalanceUpdates(
      limit: {count: $limit}
      orderBy: {descendingByField: "last_activity"}
      where: {BalanceUpdate: {Address: {is: $proxy}}}
    ) {
      Currency {
        Name
        Symbol
        SmartContract
      }
      balance: sum(of: BalanceUpdate_Amount)
      last_activity: maximum(of: Block_Time)
    }
  }
}
"#;

pub const LATEST_TRADES: &str = r#"
query LatestTrades($tokenAddress: String!, $limit: Int!, $protocol: String!) {
  EVM(network: bsc) {
    DEXTrades(
      where: {
        Trade: {
          Buy: {Currency: {SmartContract: {is: $tokenAddress}}}
          Dex: {ProtocolName: {is: $protocol}}
          Success: true
        }
      }
      orderBy: {descendingByField: "Block_Time"}
      limit: {count: $limit}
    ) {
      Transaction {
        Hash
      }
      Block {
        Time
        Number
      }
      Trade {
        Buy {
          Buyer
          Amount
          AmountInUSD
          Price
          Currency {
            Symbol
            Name
          }
        }
        Sell {
          Seller
          Amount
          Currency {
            Symbol
            Name
          }
        }
      }
    }
  }
}
"#;

pub const DEX_TRADES: &str = r#"
query DexTrades($tokenAddress: String!, $protocol: String!) {
  EVM(network: bsc) {
    DEXTrades(
      where: {
        Trade: {
          Buy: {Currency: {SmartContract: {is: $tokenAddress}}}
          Dex: {ProtocolName: {not: $protocol}}
          Success: true
        }
      }
      orderBy: {ascendingByField: "Block_Time"}
      limit: {count: 5}
    ) {
      Trade {
        Dex {
          ProtocolName
          SmartContract
        }
        Buy {
          Currency {
            Symbol
            Name
          }
        }
        Sell {
          Currency {
            Symbol
            Name
          }
        }
      }
      Block {
        Time
      }
    }
  }
}
"#;

pub const LATEST_PRICE: &str = r#"
query LatestPrice($tokenAddress: String!) {
  EVM(network: bsc) {
    DEXTrades(
      where: {
        Trade: {
          Buy: {Currency: {SmartContract: {is: $tokenAddress}}}
          Success: true
        }
      }
      orderBy: {descendingByField: "Block_Time"}
      limit: {count: 1}
    ) {
      Block {
        Time
      }
      Trade {
        Buy {
          Price
          PriceInUSD
          Currency {
            Name
            Symbol
            SmartContract
          }
        }
        Sell {
          Currency {
            Symbol
          }
        }
      }
    }
  }
}
"#;

pub const TOKEN_VOLUME: &str = r#"
query TokenVolume($tokenAddress: String!, $since: DateTime) {
  EVM(network: bsc) {
    DEXTradeByTokens(
      where: {
        Trade: {Currency: {SmartContract: {is: $tokenAddress}}, Success: true}
        Block: {Time: {since: $since}}
      }
    ) {
      volume_usd: sum(of: Trade_Side_AmountInUSD)
      trade_count: count
      unique_traders: uniq(of: Transaction_From)
    }
  }
}
"#;

pub const TOP_TRADERS: &str = r#"
query TopTraders($tokenAddress: String!, $since: DateTime, $limit: Int!) {
  EVM(network: bsc) {
    DEXTradeByTokens(
      limit: {count: $limit}
      orderBy: {descendingByField: "volume_usd"}
      where: {
        Trade: {Currency: {SmartContract: {is: $tokenAddress}}, Success: true}
        Block: {Time: {since: $since}}
      }
    ) {
      Transaction {
        From
      }
      volume_usd: sum(of: Trade_Side_AmountInUSD)
      trade_count: count
    }
  }
}
"#;
