// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;
use nom::bytes::streaming::take_till;
use nom::character::streaming::{crlf, not_line_ending, space0};
use nom::{Err, IResult};
use protocol_common::parsing::parse_unsigned;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;

/// Outcome of a storage command which the server completed. None of these are
/// errors: a `cas` losing its race or an `add` on an existing key are normal
/// cache behavior.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum MemcacheStatus {
    Ok,
    ItemNotStored,
    KeyExists,
    KeyNotFound,
}

impl Display for MemcacheStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::ItemNotStored => write!(f, "item not stored"),
            Self::KeyExists => write!(f, "key exists"),
            Self::KeyNotFound => write!(f, "key not found"),
        }
    }
}

/// The kind of a single response line, as sent by the server.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ResponseType {
    Error,
    ClientError(Box<str>),
    ServerError(Box<str>),
    Stored,
    NotStored,
    Exists,
    NotFound,
    Deleted,
    Touched,
    Ok,
    /// header line of a value returned by a retrieval command
    Value,
    /// end of the values returned by a retrieval command
    End,
    Numeric(u64),
}

impl Display for ResponseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::ClientError(message) => write!(f, "CLIENT_ERROR {message}"),
            Self::ServerError(message) => write!(f, "SERVER_ERROR {message}"),
            Self::Stored => write!(f, "STORED"),
            Self::NotStored => write!(f, "NOT_STORED"),
            Self::Exists => write!(f, "EXISTS"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Deleted => write!(f, "DELETED"),
            Self::Touched => write!(f, "TOUCHED"),
            Self::Ok => write!(f, "OK"),
            Self::Value => write!(f, "VALUE"),
            Self::End => write!(f, "END"),
            Self::Numeric(value) => write!(f, "{value}"),
        }
    }
}

// the rest of the line after the marker is a free-form message
fn message(input: &[u8]) -> IResult<&[u8], Box<str>> {
    let (input, _) = space0(input)?;
    let (input, message) = not_line_ending(input)?;
    let (input, _) = crlf(input)?;
    Ok((input, String::from_utf8_lossy(message).into()))
}

// markers which carry nothing else but may have trailing whitespace
fn bare(input: &[u8]) -> IResult<&[u8], ()> {
    let (input, _) = space0(input)?;
    let (input, _) = crlf(input)?;
    Ok((input, ()))
}

// the remainder of a line we do not interpret, such as a value header
fn skip_line(input: &[u8]) -> IResult<&[u8], ()> {
    let (input, _) = not_line_ending(input)?;
    let (input, _) = crlf(input)?;
    Ok((input, ()))
}

// longest token a reply can start with, the digits of `u64::MAX`
const MAX_TOKEN_LEN: usize = 20;

pub(crate) fn response_type(input: &[u8]) -> IResult<&[u8], ResponseType> {
    let (remaining, token) = match take_till(|b: u8| (b == b' ' || b == b'\r'))(input) {
        // no delimiter within the longest token, the stream is out of sync
        Err(Err::Incomplete(_)) if input.len() > MAX_TOKEN_LEN => {
            return Err(Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::TooLarge,
            )));
        }
        result => result?,
    };
    let response_type = match token {
        b"ERROR" => ResponseType::Error,
        b"CLIENT_ERROR" => {
            let (remaining, message) = message(remaining)?;
            return Ok((remaining, ResponseType::ClientError(message)));
        }
        b"SERVER_ERROR" => {
            let (remaining, message) = message(remaining)?;
            return Ok((remaining, ResponseType::ServerError(message)));
        }
        b"STORED" => ResponseType::Stored,
        b"NOT_STORED" => ResponseType::NotStored,
        b"EXISTS" => ResponseType::Exists,
        b"NOT_FOUND" => ResponseType::NotFound,
        b"DELETED" => ResponseType::Deleted,
        b"TOUCHED" => ResponseType::Touched,
        b"OK" => ResponseType::Ok,
        b"END" => ResponseType::End,
        b"VALUE" => {
            let (remaining, _) = skip_line(remaining)?;
            return Ok((remaining, ResponseType::Value));
        }
        _ => {
            // this is for numeric responses from incr/decr
            if let Some(value) = parse_unsigned(token) {
                ResponseType::Numeric(value)
            } else {
                return Err(nom::Err::Failure(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::Tag,
                )));
            }
        }
    };
    let (remaining, _) = bare(remaining)?;
    Ok((remaining, response_type))
}

/// Tokenizes one response line into a `ResponseType`.
#[derive(Default, Clone, Copy)]
pub struct ResponseParser;

impl Parse<ResponseType> for ResponseParser {
    fn parse(&self, buffer: &[u8]) -> std::result::Result<ParseOk<ResponseType>, std::io::Error> {
        match response_type(buffer) {
            Ok((input, response)) => Ok(ParseOk::new(response, buffer.len() - input.len())),
            Err(Err::Incomplete(_)) => Err(std::io::Error::from(ErrorKind::WouldBlock)),
            Err(_) => Err(std::io::Error::from(ErrorKind::InvalidInput)),
        }
    }
}
