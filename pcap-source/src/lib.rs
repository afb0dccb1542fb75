// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Offline capture source: iterates a libpcap file and peels the
//! Ethernet/IPv4/UDP framing off each packet.
//!
//! The extractor mirrors the dissection order of the feed handlers it
//! replaces: skip the MAC addresses, walk any stack of 802.1Q tags until
//! the IPv4 ethertype, skip the variable-length IP header, and hand back
//! the UDP payload. IP and UDP checksums are not verified. Anything that
//! is not a well-formed IPv4/UDP frame is dropped.

use std::fs::File;
use std::path::{Path, PathBuf};

use pcap_file::pcap::PcapReader;
use pcap_file::PcapError;
use thiserror::Error;

const ETHERTYPE_IPV4: u16 = 0x0800;
const IPPROTO_UDP: u8 = 17;
const MAC_ADDRESSES_LEN: usize = 12;
const VLAN_TAG_LEN: usize = 4;
const UDP_HEADER_LEN: usize = 8;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("unable to open capture file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("capture file {path} is not a valid pcap: {source}")]
    Format { path: PathBuf, source: PcapError },
    #[error("capture read error: {0}")]
    Read(#[from] PcapError),
}

/// One captured frame: arrival time in microseconds since the Unix epoch
/// and the raw bytes up to the capture length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPacket {
    pub timestamp_us: i64,
    pub data: Vec<u8>,
}

/// Offline packet source over a libpcap file.
pub struct Capture {
    reader: PcapReader<File>,
}

impl Capture {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CaptureError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = PcapReader::new(file).map_err(|source| CaptureError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { reader })
    }

    /// Next packet in arrival order, or `None` at end of file.
    pub fn next_packet(&mut self) -> Option<Result<CapturedPacket, CaptureError>> {
        let packet = match self.reader.next_packet()? {
            Ok(packet) => packet,
            Err(err) => return Some(Err(err.into())),
        };
        Some(Ok(CapturedPacket {
            timestamp_us: packet.timestamp.as_micros() as i64,
            data: packet.data.into_owned(),
        }))
    }
}

/// Strip Ethernet (including stacked 802.1Q tags), IPv4, and UDP headers
/// from a captured frame, returning the UDP payload.
///
/// Returns `None` for non-IPv4 frames, non-UDP datagrams, frames truncated
/// anywhere inside the headers, and UDP lengths shorter than the UDP
/// header itself.
pub fn udp_payload(packet: &[u8]) -> Option<&[u8]> {
    let mut offset = MAC_ADDRESSES_LEN;
    loop {
        let ethertype = read_u16(packet, offset)?;
        if ethertype == ETHERTYPE_IPV4 {
            offset += 2;
            break;
        }
        // 802.1Q tag: TPID we just read plus TCI, then the next ethertype.
        offset += VLAN_TAG_LEN;
    }

    let ip_header = packet.get(offset..)?;
    let ip_header_len = usize::from(*ip_header.first()? & 0x0f) * 4;
    let protocol = *ip_header.get(9)?;
    if protocol != IPPROTO_UDP {
        return None;
    }

    let udp = ip_header.get(ip_header_len..)?;
    let udp_total_len = usize::from(read_u16(udp, 4)?);
    let payload_len = udp_total_len.checked_sub(UDP_HEADER_LEN)?;
    udp.get(UDP_HEADER_LEN..UDP_HEADER_LEN + payload_len)
}

fn read_u16(buf: &[u8], offset: usize) -> Option<u16> {
    let bytes = buf.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}
