//! GET_APP_CONFIGURATION (0x06): flags and version.

use common::{AppConfiguration, Error};

use crate::comm::ResponseBuffer;

/// Handles GET_APP_CONFIGURATION. Takes no data.
pub fn handle_get_app_configuration(
    data: &[u8],
    response: &mut ResponseBuffer,
) -> Result<(), Error> {
    if !data.is_empty() {
        return Err(Error::InvalidDataLength);
    }
    response.append(&AppConfiguration::current().to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::constants::APP_VERSION;

    #[test]
    fn test_get_app_configuration() {
        let mut buf = [0u8; 8];
        let mut response = ResponseBuffer::new(&mut buf).unwrap();
        handle_get_app_configuration(&[], &mut response).unwrap();
        assert_eq!(response.payload()[0], 0);
        assert_eq!(&response.payload()[1..], &APP_VERSION);
    }

    #[test]
    fn test_rejects_data() {
        let mut buf = [0u8; 8];
        let mut response = ResponseBuffer::new(&mut buf).unwrap();
        assert_eq!(
            handle_get_app_configuration(&[0], &mut response),
            Err(Error::InvalidDataLength)
        );
    }
}
