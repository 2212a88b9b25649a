use common::{ApduHeader, Error, Instruction};
use log::{debug, warn};

use crate::comm::ResponseBuffer;
use crate::crypto::{Ed25519Backend, KeyService};
use crate::handlers;
use crate::ux::Ux;

/// The context of the application: key service and confirmation interface.
pub struct App<B: Ed25519Backend, U: Ux> {
    keys: KeyService<B>,
    ux: U,
}

impl<B: Ed25519Backend, U: Ux> App<B, U> {
    pub fn new(backend: B, ux: U) -> Self {
        Self {
            keys: KeyService::new(backend),
            ux,
        }
    }

    pub fn keys(&mut self) -> &mut KeyService<B> {
        &mut self.keys
    }

    pub fn ux(&self) -> &U {
        &self.ux
    }

    /// Handles one APDU and writes the response, status word included, into
    /// `response`.
    ///
    /// Returns the length of the response. `response` should hold at least
    /// `MAX_RESPONSE_LEN` bytes; if it cannot even hold a status word, nothing
    /// is written and 0 is returned.
    pub fn handle_apdu(&mut self, apdu: &[u8], response: &mut [u8]) -> usize {
        let Ok(mut out) = ResponseBuffer::new(response) else {
            warn!("Response buffer too small");
            return 0;
        };

        let result = self.dispatch(apdu, &mut out);
        if let Err(e) = result {
            warn!("Command failed: {} ({:04x})", e, e.status_word() as u16);
        }
        out.finish(result)
    }

    fn dispatch(&mut self, apdu: &[u8], out: &mut ResponseBuffer) -> Result<(), Error> {
        let (header, data) = ApduHeader::parse(apdu)?;
        let instruction = Instruction::try_from(header)?;
        debug!("{:?}, {} data bytes", instruction, data.len());

        match instruction {
            Instruction::GetAddress { confirm } => {
                handlers::handle_get_address(&mut self.keys, &mut self.ux, confirm, data, out)
            }
            Instruction::SignTransaction => {
                handlers::handle_sign_transaction(&mut self.keys, &mut self.ux, data, out)
            }
            Instruction::GetAppConfiguration => handlers::handle_get_app_configuration(data, out),
        }
    }
}
