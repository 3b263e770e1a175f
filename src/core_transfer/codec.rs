//! Line-ending conversion between the local file format and NVT ASCII.

/// The representation type selected with TYPE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferType {
    #[default]
    Ascii,
    Binary,
}

impl TransferType {
    /// Converts bytes received on the data connection into the local format.
    pub fn decode(self, data: Vec<u8>) -> Vec<u8> {
        match self {
            TransferType::Ascii => to_local(&data),
            TransferType::Binary => data,
        }
    }

    /// Converts file bytes into the form sent on the data connection.
    pub fn encode(self, data: Vec<u8>) -> Vec<u8> {
        match self {
            TransferType::Ascii => to_network(&data),
            TransferType::Binary => data,
        }
    }
}

/// Network to local: drops every `\r`.
///
/// Lossy for files containing a bare `\r`.
pub fn to_local(data: &[u8]) -> Vec<u8> {
    data.iter().copied().filter(|&b| b != b'\r').collect()
}

/// Local to network: every line break becomes exactly one `\r\n`.
///
/// A lone `\n` gets a `\r` in front of it, a lone `\r` gets a `\n` after it, and existing
/// `\r\n` pairs are copied unchanged.
pub fn to_network(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / 16);
    let mut pending_cr = false;

    for &b in data {
        match b {
            b'\n' => {
                if !pending_cr {
                    out.push(b'\r');
                }
                out.push(b'\n');
                pending_cr = false;
            }
            b'\r' => {
                if pending_cr {
                    out.push(b'\n');
                }
                out.push(b'\r');
                pending_cr = true;
            }
            _ => {
                if pending_cr {
                    out.push(b'\n');
                }
                out.push(b);
                pending_cr = false;
            }
        }
    }

    // a trailing CR still needs its LF
    if pending_cr {
        out.push(b'\n');
    }

    out
}
