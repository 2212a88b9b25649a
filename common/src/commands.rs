//! APDU framing and instruction codes of the Aeternity V-App.
//!
//! Commands are `CLA INS P1 P2 Lc data`; the class byte is checked before the
//! instruction is decoded.

use crate::constants::{APDU_HEADER_LEN, CLA};
use crate::error::Error;

/// Instruction byte of GET_ADDRESS.
pub const INS_GET_ADDRESS: u8 = 0x02;
/// Instruction byte of SIGN_TRANSACTION.
pub const INS_SIGN_TRANSACTION: u8 = 0x04;
/// Instruction byte of GET_APP_CONFIGURATION.
pub const INS_GET_APP_CONFIGURATION: u8 = 0x06;

/// P1 of GET_ADDRESS asking for on-screen confirmation.
pub const P1_CONFIRM: u8 = 0x01;
/// P1 of GET_ADDRESS returning the address without confirmation.
pub const P1_NO_CONFIRM: u8 = 0x00;

/// Header of an APDU command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApduHeader {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
}

impl ApduHeader {
    /// Splits a raw command into its header and data.
    ///
    /// The Lc byte must match the number of data bytes that follow it.
    pub fn parse(apdu: &[u8]) -> Result<(Self, &[u8]), Error> {
        if apdu.len() < APDU_HEADER_LEN {
            return Err(Error::InvalidDataLength);
        }
        let header = ApduHeader {
            cla: apdu[0],
            ins: apdu[1],
            p1: apdu[2],
            p2: apdu[3],
        };
        let data = &apdu[APDU_HEADER_LEN..];
        if data.len() != apdu[4] as usize {
            return Err(Error::InvalidDataLength);
        }
        Ok((header, data))
    }
}

/// Possible input commands received through APDUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    GetAddress { confirm: bool },
    SignTransaction,
    GetAppConfiguration,
}

impl TryFrom<ApduHeader> for Instruction {
    type Error = Error;

    /// Decodes INS, P1 and P2 into an [`Instruction`].
    ///
    /// Invalid INS, P1 or P2 values map to errors whose status word is sent
    /// back to the host as is.
    fn try_from(value: ApduHeader) -> Result<Self, Self::Error> {
        if value.cla != CLA {
            return Err(Error::InvalidClass);
        }
        match (value.ins, value.p1, value.p2) {
            (INS_GET_ADDRESS, P1_NO_CONFIRM, 0) => Ok(Instruction::GetAddress { confirm: false }),
            (INS_GET_ADDRESS, P1_CONFIRM, 0) => Ok(Instruction::GetAddress { confirm: true }),
            (INS_SIGN_TRANSACTION, 0, 0) => Ok(Instruction::SignTransaction),
            (INS_GET_APP_CONFIGURATION, 0, 0) => Ok(Instruction::GetAppConfiguration),
            (INS_GET_ADDRESS | INS_SIGN_TRANSACTION | INS_GET_APP_CONFIGURATION, _, _) => {
                Err(Error::InvalidParameter)
            }
            (_, _, _) => Err(Error::InvalidCommand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_parse_apdu() {
        let apdu = hex!("e002000004 00000001");
        let (header, data) = ApduHeader::parse(&apdu).unwrap();
        assert_eq!(
            header,
            ApduHeader {
                cla: 0xe0,
                ins: 0x02,
                p1: 0,
                p2: 0
            }
        );
        assert_eq!(data, &hex!("00000001"));
    }

    #[test]
    fn test_parse_apdu_bad_lc() {
        assert_eq!(
            ApduHeader::parse(&hex!("e002000005 00000001")),
            Err(Error::InvalidDataLength)
        );
        assert_eq!(ApduHeader::parse(&hex!("e00200")), Err(Error::InvalidDataLength));
    }

    #[test]
    fn test_instruction_decoding() {
        let header = |cla, ins, p1, p2| ApduHeader { cla, ins, p1, p2 };

        assert_eq!(
            Instruction::try_from(header(0xe0, 0x02, 0x01, 0)),
            Ok(Instruction::GetAddress { confirm: true })
        );
        assert_eq!(
            Instruction::try_from(header(0xe0, 0x04, 0, 0)),
            Ok(Instruction::SignTransaction)
        );
        assert_eq!(
            Instruction::try_from(header(0xe0, 0x04, 0x80, 0)),
            Err(Error::InvalidParameter)
        );
        assert_eq!(
            Instruction::try_from(header(0xe0, 0x42, 0, 0)),
            Err(Error::InvalidCommand)
        );
        assert_eq!(
            Instruction::try_from(header(0xb0, 0x02, 0, 0)),
            Err(Error::InvalidClass)
        );
    }
}
