//! Quoter contract interface
//!
//! All three quoter families expose the same two single-hop quote functions.
//! Calls are encoded here and handed to a [`ChainClient`](super::ChainClient)
//! as raw calldata, so the transport never needs to know the ABI.

use alloy::primitives::aliases::{U24, U160};
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use super::types::PoolFee;

sol! {
    /// Quote functions shared by the Mixed, Bin and Concentrated-Liquidity quoters
    interface IQuoter {
        function quoteExactInputSingle(
            address tokenIn,
            address tokenOut,
            uint256 amountIn,
            uint24 fee,
            uint160 sqrtPriceLimitX96
        ) external returns (uint256 amountOut);

        function quoteExactOutputSingle(
            address tokenIn,
            address tokenOut,
            uint256 amountOut,
            uint24 fee,
            uint160 sqrtPriceLimitX96
        ) external returns (uint256 amountIn);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteDirection {
    /// Amount is the input; the quoter returns the output
    ExactInput,
    /// Amount is the desired output; the quoter returns the required input
    ExactOutput,
}

impl QuoteDirection {
    pub fn signature(&self) -> &'static str {
        match self {
            QuoteDirection::ExactInput => IQuoter::quoteExactInputSingleCall::SIGNATURE,
            QuoteDirection::ExactOutput => IQuoter::quoteExactOutputSingleCall::SIGNATURE,
        }
    }
}

/// One quoter call. The price limit is always zero ("no limit").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteCall {
    pub direction: QuoteDirection,
    pub token_in: Address,
    pub token_out: Address,
    /// Fixed-point amount, input or output depending on `direction`
    pub amount: U256,
    pub fee: PoolFee,
}

impl QuoteCall {
    pub fn encode(&self) -> Bytes {
        let fee = U24::from(self.fee.as_u32());
        let calldata = match self.direction {
            QuoteDirection::ExactInput => IQuoter::quoteExactInputSingleCall {
                tokenIn: self.token_in,
                tokenOut: self.token_out,
                amountIn: self.amount,
                fee,
                sqrtPriceLimitX96: U160::ZERO,
            }
            .abi_encode(),
            QuoteDirection::ExactOutput => IQuoter::quoteExactOutputSingleCall {
                tokenIn: self.token_in,
                tokenOut: self.token_out,
                amountOut: self.amount,
                fee,
                sqrtPriceLimitX96: U160::ZERO,
            }
            .abi_encode(),
        };
        calldata.into()
    }

    /// Parse calldata produced by [`encode`](Self::encode). `None` for any
    /// other function.
    pub fn decode(input: &[u8]) -> Option<Self> {
        if let Ok(call) = IQuoter::quoteExactInputSingleCall::abi_decode(input) {
            return Some(Self {
                direction: QuoteDirection::ExactInput,
                token_in: call.tokenIn,
                token_out: call.tokenOut,
                amount: call.amountIn,
                fee: PoolFee::new(call.fee.to::<u32>()).ok()?,
            });
        }
        let call = IQuoter::quoteExactOutputSingleCall::abi_decode(input).ok()?;
        Some(Self {
            direction: QuoteDirection::ExactOutput,
            token_in: call.tokenIn,
            token_out: call.tokenOut,
            amount: call.amountOut,
            fee: PoolFee::new(call.fee.to::<u32>()).ok()?,
        })
    }

    /// Decode the quoted amount from the call's return data.
    pub fn decode_output(&self, output: &[u8]) -> Result<U256, alloy::sol_types::Error> {
        match self.direction {
            QuoteDirection::ExactInput => {
                IQuoter::quoteExactInputSingleCall::abi_decode_returns(output)
            }
            QuoteDirection::ExactOutput => {
                IQuoter::quoteExactOutputSingleCall::abi_decode_returns(output)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use alloy::sol_types::SolValue;

    fn call(direction: QuoteDirection) -> QuoteCall {
        QuoteCall {
            direction,
            token_in: address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            token_out: address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
            amount: U256::from(1_500_000_000_000_000_000u128),
            fee: PoolFee::MEDIUM,
        }
    }

    #[test]
    fn test_signatures() {
        assert_eq!(
            QuoteDirection::ExactInput.signature(),
            "quoteExactInputSingle(address,address,uint256,uint24,uint160)"
        );
        assert_eq!(
            QuoteDirection::ExactOutput.signature(),
            "quoteExactOutputSingle(address,address,uint256,uint24,uint160)"
        );
    }

    #[test]
    fn test_calldata_layout() {
        let data = call(QuoteDirection::ExactInput).encode();

        // selector + five static words
        assert_eq!(data.len(), 4 + 5 * 32);
        assert_eq!(&data[..4], IQuoter::quoteExactInputSingleCall::SELECTOR.as_slice());
        // fee word
        assert_eq!(data[4 + 3 * 32 + 30..4 + 4 * 32], [0x09, 0xc4]);
        // price limit word
        assert!(data[4 + 4 * 32..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_decode_recovers_call() {
        for direction in [QuoteDirection::ExactInput, QuoteDirection::ExactOutput] {
            let original = call(direction);
            assert_eq!(QuoteCall::decode(&original.encode()), Some(original));
        }
        assert_eq!(QuoteCall::decode(&[0xa9, 0x05, 0x9c, 0xbb]), None);
    }

    #[test]
    fn test_decode_output_full_width() {
        let big: U256 = U256::from(1u8) << 200;
        let output = big.abi_encode();
        assert_eq!(call(QuoteDirection::ExactInput).decode_output(&output).unwrap(), big);
        assert!(call(QuoteDirection::ExactInput).decode_output(&output[..4]).is_err());
    }
}
