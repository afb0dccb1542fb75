// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! The TotalView superset row and its message decoders.
//!
//! Every v5.0 message body opens with `stock_locate` (u16),
//! `tracking_number` (u16), and a 48-bit nanoseconds-since-midnight
//! `timestamp`. The one exception is Reg-SHO (`Y`), whose leading two bytes
//! carry the same wire value but are kept as the distinct `locate_code`
//! column. Price fields are 4-byte fixed-point (6.4) transported as u32
//! and never rescaled here; MWCB decline levels are 8-byte.

use std::fmt;

use core_types::{csv, Cursor, Envelope, ItchRecord, WireError};

/// One row of the TotalView output: envelope plus every payload field that
/// appears in any v5.0 message, in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub envelope: Envelope,

    pub attribution: Option<String>,
    pub auction_collar_extension: Option<u32>,
    pub auction_collar_reference_price: Option<u32>,
    pub authenticity: Option<u8>,
    pub breached_level: Option<u8>,
    pub buy_sell_indicator: Option<u8>,
    pub canceled_shares: Option<u32>,
    pub cross_price: Option<u32>,
    pub cross_shares: Option<u64>,
    pub cross_type: Option<u8>,
    pub current_reference_price: Option<u32>,
    pub etp_flag: Option<u8>,
    pub etp_leverage_factor: Option<u32>,
    pub event_code: Option<u8>,
    pub executed_shares: Option<u32>,
    pub execution_price: Option<u32>,
    pub far_price: Option<u32>,
    pub financial_status_indicator: Option<u8>,
    pub imbalance_direction: Option<u8>,
    pub imbalance_shares: Option<u64>,
    pub interest_flag: Option<u8>,
    pub inverse_indicator: Option<u8>,
    pub ipo_flag: Option<u8>,
    pub ipo_price: Option<u32>,
    pub ipo_quotation_release_qualifier: Option<u8>,
    pub ipo_quotation_release_time: Option<u32>,
    pub issue_classification: Option<u8>,
    pub issue_sub_type: Option<String>,
    pub level_1: Option<u64>,
    pub level_2: Option<u64>,
    pub level_3: Option<u64>,
    pub locate_code: Option<u16>,
    pub lower_auction_collar_price: Option<u32>,
    pub luld_reference_price_tier: Option<u8>,
    pub market_category: Option<u8>,
    pub market_maker_mode: Option<u8>,
    pub market_participant_state: Option<u8>,
    pub match_number: Option<u64>,
    pub mpid: Option<String>,
    pub near_price: Option<u32>,
    pub new_order_reference_number: Option<u64>,
    pub order_reference_number: Option<u64>,
    pub original_order_reference_number: Option<u64>,
    pub paired_shares: Option<u64>,
    pub price: Option<u32>,
    pub price_variation_indicator: Option<u8>,
    pub primary_market_maker: Option<u8>,
    pub printable: Option<u8>,
    pub reason: Option<String>,
    pub reg_sho_action: Option<u8>,
    pub reserved: Option<u8>,
    pub round_lot_size: Option<u32>,
    pub round_lots_only: Option<u8>,
    pub shares: Option<u32>,
    pub short_sale_threshold_indicator: Option<u8>,
    pub stock: Option<String>,
    pub stock_locate: Option<u16>,
    pub timestamp: Option<u64>,
    pub tracking_number: Option<u16>,
    pub trading_state: Option<u8>,
    pub upper_auction_collar_price: Option<u32>,
}

impl ItchRecord for Record {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    fn reset_payload(&mut self) {
        self.attribution = None;
        self.auction_collar_extension = None;
        self.auction_collar_reference_price = None;
        self.authenticity = None;
        self.breached_level = None;
        self.buy_sell_indicator = None;
        self.canceled_shares = None;
        self.cross_price = None;
        self.cross_shares = None;
        self.cross_type = None;
        self.current_reference_price = None;
        self.etp_flag = None;
        self.etp_leverage_factor = None;
        self.event_code = None;
        self.executed_shares = None;
        self.execution_price = None;
        self.far_price = None;
        self.financial_status_indicator = None;
        self.imbalance_direction = None;
        self.imbalance_shares = None;
        self.interest_flag = None;
        self.inverse_indicator = None;
        self.ipo_flag = None;
        self.ipo_price = None;
        self.ipo_quotation_release_qualifier = None;
        self.ipo_quotation_release_time = None;
        self.issue_classification = None;
        self.issue_sub_type = None;
        self.level_1 = None;
        self.level_2 = None;
        self.level_3 = None;
        self.locate_code = None;
        self.lower_auction_collar_price = None;
        self.luld_reference_price_tier = None;
        self.market_category = None;
        self.market_maker_mode = None;
        self.market_participant_state = None;
        self.match_number = None;
        self.mpid = None;
        self.near_price = None;
        self.new_order_reference_number = None;
        self.order_reference_number = None;
        self.original_order_reference_number = None;
        self.paired_shares = None;
        self.price = None;
        self.price_variation_indicator = None;
        self.primary_market_maker = None;
        self.printable = None;
        self.reason = None;
        self.reg_sho_action = None;
        self.reserved = None;
        self.round_lot_size = None;
        self.round_lots_only = None;
        self.shares = None;
        self.short_sale_threshold_indicator = None;
        self.stock = None;
        self.stock_locate = None;
        self.timestamp = None;
        self.tracking_number = None;
        self.trading_state = None;
        self.upper_auction_collar_price = None;
    }

    fn decode_payload(
        &mut self,
        message_type: u8,
        body: &mut Cursor<'_>,
    ) -> Result<(), WireError> {
        match message_type {
            b'S' => self.decode_system_event(body),
            b'R' => self.decode_stock_directory(body),
            b'H' => self.decode_stock_trading_action(body),
            b'Y' => self.decode_reg_sho_restriction(body),
            b'L' => self.decode_market_participant_position(body),
            b'V' => self.decode_mwcb_decline_level(body),
            b'W' => self.decode_mwcb_status(body),
            b'K' => self.decode_ipo_quoting_period_update(body),
            b'J' => self.decode_luld_auction_collar(body),
            b'A' => self.decode_add_order(body),
            b'F' => self.decode_add_order_with_mpid(body),
            b'E' => self.decode_order_executed(body),
            b'C' => self.decode_order_executed_with_price(body),
            b'X' => self.decode_order_cancel(body),
            b'D' => self.decode_order_delete(body),
            b'U' => self.decode_order_replace(body),
            b'P' => self.decode_non_cross_trade(body),
            b'Q' => self.decode_cross_trade(body),
            b'B' => self.decode_broken_trade(body),
            b'I' => self.decode_net_order_imbalance(body),
            b'N' => self.decode_retail_interest(body),
            _ => Ok(()),
        }
    }
}

impl Record {
    /// Common prefix of every message body except Reg-SHO.
    fn decode_prefix(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.stock_locate = Some(body.u16()?);
        self.tracking_number = Some(body.u16()?);
        self.timestamp = Some(body.u48()?);
        Ok(())
    }

    fn decode_system_event(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.event_code = Some(body.code()?);
        Ok(())
    }

    fn decode_stock_directory(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.stock = Some(body.padded_str(8)?);
        self.market_category = Some(body.code()?);
        self.financial_status_indicator = Some(body.code()?);
        self.round_lot_size = Some(body.u32()?);
        self.round_lots_only = Some(body.code()?);
        self.issue_classification = Some(body.code()?);
        self.issue_sub_type = Some(body.padded_str(2)?);
        self.authenticity = Some(body.code()?);
        self.short_sale_threshold_indicator = Some(body.code()?);
        self.ipo_flag = Some(body.code()?);
        self.luld_reference_price_tier = Some(body.code()?);
        self.etp_flag = Some(body.code()?);
        self.etp_leverage_factor = Some(body.u32()?);
        self.inverse_indicator = Some(body.code()?);
        Ok(())
    }

    fn decode_stock_trading_action(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.stock = Some(body.padded_str(8)?);
        self.trading_state = Some(body.code()?);
        self.reserved = Some(body.code()?);
        self.reason = Some(body.padded_str(4)?);
        Ok(())
    }

    // Same wire shape as the common prefix, but the leading u16 is the
    // locate code, not a stock locate.
    fn decode_reg_sho_restriction(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.locate_code = Some(body.u16()?);
        self.tracking_number = Some(body.u16()?);
        self.timestamp = Some(body.u48()?);
        self.stock = Some(body.padded_str(8)?);
        self.reg_sho_action = Some(body.code()?);
        Ok(())
    }

    fn decode_market_participant_position(
        &mut self,
        body: &mut Cursor<'_>,
    ) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.mpid = Some(body.padded_str(4)?);
        self.stock = Some(body.padded_str(8)?);
        self.primary_market_maker = Some(body.code()?);
        self.market_maker_mode = Some(body.code()?);
        self.market_participant_state = Some(body.code()?);
        Ok(())
    }

    fn decode_mwcb_decline_level(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.level_1 = Some(body.u64()?);
        self.level_2 = Some(body.u64()?);
        self.level_3 = Some(body.u64()?);
        Ok(())
    }

    fn decode_mwcb_status(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.breached_level = Some(body.code()?);
        Ok(())
    }

    fn decode_ipo_quoting_period_update(
        &mut self,
        body: &mut Cursor<'_>,
    ) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.stock = Some(body.padded_str(8)?);
        self.ipo_quotation_release_time = Some(body.u32()?);
        self.ipo_quotation_release_qualifier = Some(body.code()?);
        self.ipo_price = Some(body.u32()?);
        Ok(())
    }

    fn decode_luld_auction_collar(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.stock = Some(body.padded_str(8)?);
        self.auction_collar_reference_price = Some(body.u32()?);
        self.upper_auction_collar_price = Some(body.u32()?);
        self.lower_auction_collar_price = Some(body.u32()?);
        self.auction_collar_extension = Some(body.u32()?);
        Ok(())
    }

    fn decode_add_order(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.order_reference_number = Some(body.u64()?);
        self.buy_sell_indicator = Some(body.code()?);
        self.shares = Some(body.u32()?);
        self.stock = Some(body.padded_str(8)?);
        self.price = Some(body.u32()?);
        Ok(())
    }

    fn decode_add_order_with_mpid(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_add_order(body)?;
        self.attribution = Some(body.padded_str(4)?);
        Ok(())
    }

    fn decode_order_executed(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.order_reference_number = Some(body.u64()?);
        self.executed_shares = Some(body.u32()?);
        self.match_number = Some(body.u64()?);
        Ok(())
    }

    fn decode_order_executed_with_price(
        &mut self,
        body: &mut Cursor<'_>,
    ) -> Result<(), WireError> {
        self.decode_order_executed(body)?;
        self.printable = Some(body.code()?);
        self.execution_price = Some(body.u32()?);
        Ok(())
    }

    fn decode_order_cancel(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.order_reference_number = Some(body.u64()?);
        self.canceled_shares = Some(body.u32()?);
        Ok(())
    }

    fn decode_order_delete(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.order_reference_number = Some(body.u64()?);
        Ok(())
    }

    fn decode_order_replace(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.original_order_reference_number = Some(body.u64()?);
        self.new_order_reference_number = Some(body.u64()?);
        self.shares = Some(body.u32()?);
        self.price = Some(body.u32()?);
        Ok(())
    }

    fn decode_non_cross_trade(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.order_reference_number = Some(body.u64()?);
        self.buy_sell_indicator = Some(body.code()?);
        self.shares = Some(body.u32()?);
        self.stock = Some(body.padded_str(8)?);
        self.price = Some(body.u32()?);
        self.match_number = Some(body.u64()?);
        Ok(())
    }

    fn decode_cross_trade(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.cross_shares = Some(body.u64()?);
        self.stock = Some(body.padded_str(8)?);
        self.cross_price = Some(body.u32()?);
        self.match_number = Some(body.u64()?);
        self.cross_type = Some(body.code()?);
        Ok(())
    }

    fn decode_broken_trade(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.match_number = Some(body.u64()?);
        Ok(())
    }

    fn decode_net_order_imbalance(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.paired_shares = Some(body.u64()?);
        self.imbalance_shares = Some(body.u64()?);
        self.imbalance_direction = Some(body.code()?);
        self.stock = Some(body.padded_str(8)?);
        self.far_price = Some(body.u32()?);
        self.near_price = Some(body.u32()?);
        self.current_reference_price = Some(body.u32()?);
        self.cross_type = Some(body.code()?);
        self.price_variation_indicator = Some(body.code()?);
        Ok(())
    }

    fn decode_retail_interest(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.decode_prefix(body)?;
        self.stock = Some(body.padded_str(8)?);
        self.interest_flag = Some(body.code()?);
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.envelope)?;
        csv::opt(f, &self.attribution)?;
        csv::opt(f, &self.auction_collar_extension)?;
        csv::opt(f, &self.auction_collar_reference_price)?;
        csv::code(f, &self.authenticity)?;
        csv::code(f, &self.breached_level)?;
        csv::code(f, &self.buy_sell_indicator)?;
        csv::opt(f, &self.canceled_shares)?;
        csv::opt(f, &self.cross_price)?;
        csv::opt(f, &self.cross_shares)?;
        csv::code(f, &self.cross_type)?;
        csv::opt(f, &self.current_reference_price)?;
        csv::code(f, &self.etp_flag)?;
        csv::opt(f, &self.etp_leverage_factor)?;
        csv::code(f, &self.event_code)?;
        csv::opt(f, &self.executed_shares)?;
        csv::opt(f, &self.execution_price)?;
        csv::opt(f, &self.far_price)?;
        csv::code(f, &self.financial_status_indicator)?;
        csv::code(f, &self.imbalance_direction)?;
        csv::opt(f, &self.imbalance_shares)?;
        csv::code(f, &self.interest_flag)?;
        csv::code(f, &self.inverse_indicator)?;
        csv::code(f, &self.ipo_flag)?;
        csv::opt(f, &self.ipo_price)?;
        csv::code(f, &self.ipo_quotation_release_qualifier)?;
        csv::opt(f, &self.ipo_quotation_release_time)?;
        csv::code(f, &self.issue_classification)?;
        csv::opt(f, &self.issue_sub_type)?;
        csv::opt(f, &self.level_1)?;
        csv::opt(f, &self.level_2)?;
        csv::opt(f, &self.level_3)?;
        csv::opt(f, &self.locate_code)?;
        csv::opt(f, &self.lower_auction_collar_price)?;
        csv::code(f, &self.luld_reference_price_tier)?;
        csv::code(f, &self.market_category)?;
        csv::code(f, &self.market_maker_mode)?;
        csv::code(f, &self.market_participant_state)?;
        csv::opt(f, &self.match_number)?;
        csv::opt(f, &self.mpid)?;
        csv::opt(f, &self.near_price)?;
        csv::opt(f, &self.new_order_reference_number)?;
        csv::opt(f, &self.order_reference_number)?;
        csv::opt(f, &self.original_order_reference_number)?;
        csv::opt(f, &self.paired_shares)?;
        csv::opt(f, &self.price)?;
        csv::code(f, &self.price_variation_indicator)?;
        csv::code(f, &self.primary_market_maker)?;
        csv::code(f, &self.printable)?;
        csv::opt(f, &self.reason)?;
        csv::code(f, &self.reg_sho_action)?;
        csv::code(f, &self.reserved)?;
        csv::opt(f, &self.round_lot_size)?;
        csv::code(f, &self.round_lots_only)?;
        csv::opt(f, &self.shares)?;
        csv::code(f, &self.short_sale_threshold_indicator)?;
        csv::opt(f, &self.stock)?;
        csv::opt(f, &self.stock_locate)?;
        csv::opt(f, &self.timestamp)?;
        csv::opt(f, &self.tracking_number)?;
        csv::code(f, &self.trading_state)?;
        csv::opt(f, &self.upper_auction_collar_price)?;
        writeln!(f)
    }
}
