//! Full pipeline tests: synthesize a capture file, convert it, then read
//! the Parquet output and the CSV replay back.

use std::fs::File;
use std::time::Duration;

use itchcap::{convert, replay, Options};
use pcap_file::pcap::{PcapPacket, PcapWriter};
use storage::Reader;
use tempfile::TempDir;

const ETHERTYPE_IPV4: u16 = 0x0800;
const IPPROTO_UDP: u8 = 17;
const IPPROTO_TCP: u8 = 6;

fn frame(vlan_tags: usize, protocol: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(&[0x02; 6]);
    frame.extend_from_slice(&[0x04; 6]);
    for tag in 0..vlan_tags {
        frame.extend_from_slice(&0x8100u16.to_be_bytes());
        frame.extend_from_slice(&(tag as u16).to_be_bytes());
    }
    frame.extend_from_slice(&ETHERTYPE_IPV4.to_be_bytes());

    let total_len = (20 + 8 + payload.len()) as u16;
    frame.push(0x45);
    frame.push(0x00);
    frame.extend_from_slice(&total_len.to_be_bytes());
    frame.extend_from_slice(&[0x00; 5]);
    frame.push(protocol);
    frame.extend_from_slice(&[0x00; 2]);
    frame.extend_from_slice(&[10, 0, 0, 1]);
    frame.extend_from_slice(&[239, 0, 0, 1]);

    frame.extend_from_slice(&26000u16.to_be_bytes());
    frame.extend_from_slice(&26001u16.to_be_bytes());
    frame.extend_from_slice(&((8 + payload.len()) as u16).to_be_bytes());
    frame.extend_from_slice(&[0x00; 2]);
    frame.extend_from_slice(payload);
    frame
}

fn itch_packet(session: &[u8; 10], sequence: u64, messages: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(session);
    payload.extend_from_slice(&sequence.to_be_bytes());
    payload.extend_from_slice(&(messages.len() as u16).to_be_bytes());
    for message in messages {
        payload.extend_from_slice(&(message.len() as u16).to_be_bytes());
        payload.extend_from_slice(message);
    }
    payload
}

fn write_pcap(path: &std::path::Path, frames: &[(u64, Vec<u8>)]) {
    let file = File::create(path).unwrap();
    let mut writer = PcapWriter::new(file).unwrap();
    for (micros, data) in frames {
        let packet = PcapPacket::new(Duration::from_micros(*micros), data.len() as u32, data);
        writer.write_packet(&packet).unwrap();
    }
}

fn jnx_order_added() -> Vec<u8> {
    let mut message = vec![b'A'];
    message.extend_from_slice(&500_000_000u32.to_be_bytes());
    message.extend_from_slice(&7777u64.to_be_bytes());
    message.push(b'B');
    message.extend_from_slice(&200u32.to_be_bytes());
    message.extend_from_slice(&1301u32.to_be_bytes());
    message.extend_from_slice(b"STD ");
    message.extend_from_slice(&1_234_500u32.to_be_bytes());
    message
}

#[test]
fn jnx_pipeline_end_to_end() {
    let dir = TempDir::new().unwrap();
    let pcap_path = dir.path().join("jnx.pcap");
    let parquet_path = dir.path().join("jnx.parquet");

    let base_micros = 1_704_067_200_000_000u64; // 2024-01-01 00:00:00 UTC
    let order_added = itch_packet(b"SESSION001", 100, &[jnx_order_added()]);
    let unknown = itch_packet(b"SESSION001", 300, &[b"Z???".to_vec()]);
    let batch = itch_packet(
        b"SESSION001",
        200,
        &[
            {
                let mut message = vec![b'T'];
                message.extend_from_slice(&34_200u32.to_be_bytes());
                message
            },
            {
                let mut message = vec![b'D'];
                message.extend_from_slice(&1u32.to_be_bytes());
                message.extend_from_slice(&7777u64.to_be_bytes());
                message
            },
            {
                let mut message = vec![b'E'];
                message.extend_from_slice(&2u32.to_be_bytes());
                message.extend_from_slice(&7777u64.to_be_bytes());
                message.extend_from_slice(&50u32.to_be_bytes());
                message.extend_from_slice(&9001u64.to_be_bytes());
                message
            },
        ],
    );

    write_pcap(
        &pcap_path,
        &[
            (base_micros, frame(0, IPPROTO_UDP, &order_added)),
            (base_micros + 1, frame(0, IPPROTO_TCP, b"NOT ITCH")),
            (base_micros + 2, frame(1, IPPROTO_UDP, &order_added)),
            (base_micros + 3, frame(0, IPPROTO_UDP, &unknown)),
            (base_micros + 4, frame(0, IPPROTO_UDP, &batch)),
        ],
    );

    let options = Options {
        pcap_file: pcap_path.to_string_lossy().to_string(),
        parquet_file: parquet_path.to_string_lossy().to_string(),
        max_row_group_size: 2,
    };
    let stats = convert::<jnx_itch::Record>(&options).unwrap();
    assert_eq!(stats.packets, 5);
    assert_eq!(stats.skipped_packets, 1);
    assert_eq!(stats.rows, 6);

    let rows: Vec<jnx_itch::Record> = Reader::open(&parquet_path)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 6);

    // scenario: order added without attribution
    let added = &rows[0];
    assert_eq!(added.envelope.pcap_index, 1);
    assert_eq!(added.envelope.session, "SESSION001");
    assert_eq!(added.envelope.message_sequence, 100);
    assert_eq!(added.envelope.message_index, 1);
    assert_eq!(added.envelope.message_type, b'A');
    assert_eq!(added.group.as_deref(), Some("STD"));
    assert_eq!(added.quantity, Some(200));
    assert_eq!(added.price, Some(1_234_500));
    assert_eq!(added.attribution, None);
    assert_eq!(added.order_type, None);

    // the TCP packet left a hole in pcap_index, the VLAN frame decodes
    // identically to the untagged one
    let tagged = &rows[1];
    assert_eq!(tagged.envelope.pcap_index, 3);
    let mut expected = added.clone();
    expected.envelope.pcap_index = tagged.envelope.pcap_index;
    expected.envelope.pcap_timestamp = tagged.envelope.pcap_timestamp;
    assert_eq!(tagged, &expected);

    // unknown type: envelope only
    let unknown_row = &rows[2];
    assert_eq!(unknown_row.envelope.pcap_index, 4);
    assert_eq!(unknown_row.envelope.message_type, b'Z');
    assert_eq!(unknown_row.envelope.message_sequence, 300);
    let mut blank = jnx_itch::Record::default();
    blank.envelope = unknown_row.envelope.clone();
    assert_eq!(unknown_row, &blank);

    // batch of three: contiguous sequence and index
    for (offset, row) in rows[3..].iter().enumerate() {
        assert_eq!(row.envelope.pcap_index, 5);
        assert_eq!(row.envelope.message_sequence, 200 + offset as u64);
        assert_eq!(row.envelope.message_index, 1 + offset as u16);
    }
    assert_eq!(rows[3].timestamp_seconds, Some(34_200));
    assert_eq!(rows[4].order_number, Some(7777));
    assert_eq!(rows[5].executed_quantity, Some(50));
    assert_eq!(rows[5].match_number, Some(9001));

    // CSV replay, trailing comma preserved
    let mut csv = Vec::new();
    replay::<jnx_itch::Record, _>(&options.parquet_file, &mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines[0],
        "1,2024-01-01 00:00:00,SESSION001,100,1,A,\
         ,B,,STD,,,,7777,,,1301,,1234500,,,,,200,,,,500000000,,,"
    );
    for line in &lines {
        assert!(line.ends_with(','));
        assert_eq!(line.matches(',').count(), 31);
    }
}

#[test]
fn nasdaq_pipeline_end_to_end() {
    let dir = TempDir::new().unwrap();
    let pcap_path = dir.path().join("nasdaq.pcap");
    let parquet_path = dir.path().join("nasdaq.parquet");

    let add_with_mpid = {
        let mut message = vec![b'F'];
        message.extend_from_slice(&42u16.to_be_bytes());
        message.extend_from_slice(&0u16.to_be_bytes());
        message.extend_from_slice(&34_200_000_000_000u64.to_be_bytes()[2..]);
        message.extend_from_slice(&1u64.to_be_bytes());
        message.push(b'B');
        message.extend_from_slice(&100u32.to_be_bytes());
        message.extend_from_slice(b"AAPL    ");
        message.extend_from_slice(&1_500_000u32.to_be_bytes());
        message.extend_from_slice(b"MMAA");
        message
    };
    let reg_sho = {
        let mut message = vec![b'Y'];
        message.extend_from_slice(&7u16.to_be_bytes());
        message.extend_from_slice(&2u16.to_be_bytes());
        message.extend_from_slice(&34_200_000_000_001u64.to_be_bytes()[2..]);
        message.extend_from_slice(b"ACME    ");
        message.push(b'1');
        message
    };

    let packet = itch_packet(b"NSDQ050001", 1, &[add_with_mpid, reg_sho]);
    write_pcap(
        &pcap_path,
        &[(1_704_067_200_000_000, frame(0, IPPROTO_UDP, &packet))],
    );

    let options = Options {
        pcap_file: pcap_path.to_string_lossy().to_string(),
        parquet_file: parquet_path.to_string_lossy().to_string(),
        max_row_group_size: 1000,
    };
    let stats = convert::<nasdaq_itch::Record>(&options).unwrap();
    assert_eq!(stats.packets, 1);
    assert_eq!(stats.rows, 2);

    let rows: Vec<nasdaq_itch::Record> = Reader::open(&parquet_path)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 2);

    let add = &rows[0];
    assert_eq!(add.envelope.message_sequence, 1);
    assert_eq!(add.envelope.message_type, b'F');
    assert_eq!(add.stock_locate, Some(42));
    assert_eq!(add.tracking_number, Some(0));
    assert_eq!(add.timestamp, Some(34_200_000_000_000));
    assert_eq!(add.stock.as_deref(), Some("AAPL"));
    assert_eq!(add.attribution.as_deref(), Some("MMAA"));
    assert_eq!(add.locate_code, None);

    // only Reg-SHO routes its leading two bytes into locate_code
    let restricted = &rows[1];
    assert_eq!(restricted.envelope.message_sequence, 2);
    assert_eq!(restricted.envelope.message_index, 2);
    assert_eq!(restricted.locate_code, Some(7));
    assert_eq!(restricted.stock_locate, None);
    assert_eq!(restricted.stock.as_deref(), Some("ACME"));
    assert_eq!(restricted.reg_sho_action, Some(b'1'));

    let mut csv = Vec::new();
    replay::<nasdaq_itch::Record, _>(&options.parquet_file, &mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert!(line.ends_with(','));
        assert_eq!(line.matches(',').count(), 67);
    }
    assert!(lines[0].contains("AAPL"));
    assert!(lines[0].contains("MMAA"));
    assert!(lines[1].contains("ACME"));
}

#[test]
fn truncated_body_abandons_the_rest_of_the_packet() {
    let dir = TempDir::new().unwrap();
    let pcap_path = dir.path().join("cut.pcap");
    let parquet_path = dir.path().join("cut.parquet");

    // second message declares more bytes than the packet holds
    let mut payload = itch_packet(b"SESSION001", 500, &[jnx_order_added()]);
    let count_at = 10 + 8;
    payload[count_at..count_at + 2].copy_from_slice(&2u16.to_be_bytes());
    payload.extend_from_slice(&50u16.to_be_bytes());
    payload.extend_from_slice(&[b'D', 0, 0]);

    write_pcap(
        &pcap_path,
        &[
            (1_000_000, frame(0, IPPROTO_UDP, &payload)),
            (
                2_000_000,
                frame(0, IPPROTO_UDP, &itch_packet(b"SESSION001", 600, &[jnx_order_added()])),
            ),
        ],
    );

    let options = Options {
        pcap_file: pcap_path.to_string_lossy().to_string(),
        parquet_file: parquet_path.to_string_lossy().to_string(),
        max_row_group_size: 1000,
    };
    let stats = convert::<jnx_itch::Record>(&options).unwrap();
    assert_eq!(stats.packets, 2);
    assert_eq!(stats.skipped_packets, 0);
    assert_eq!(stats.rows, 2);

    let rows: Vec<jnx_itch::Record> = Reader::open(&parquet_path)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows[0].envelope.message_sequence, 500);
    assert_eq!(rows[0].envelope.pcap_index, 1);
    assert_eq!(rows[1].envelope.message_sequence, 600);
    assert_eq!(rows[1].envelope.pcap_index, 2);
}
