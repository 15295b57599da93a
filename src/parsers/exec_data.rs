//! JaCoCo execution data codec
//!
//! The file is a big-endian stream of blocks, each introduced by a type byte:
//!
//! - `0x01` header: magic `0xC0C0` and format version `0x1007`
//! - `0x10` session info: id, start millis, dump millis
//! - `0x11` execution data: class id, class name, probe array
//!
//! Strings are a `u16` byte length followed by UTF-8. Probe arrays are a
//! var-int length followed by the bits packed eight to a byte, least
//! significant bit first. Files may contain several headers when data was
//! appended by multiple sessions.

use crate::models::execution_data::{ExecutionData, SessionInfo};
use std::io::{self, Read, Write};

pub const BLOCK_HEADER: u8 = 0x01;
pub const BLOCK_SESSIONINFO: u8 = 0x10;
pub const BLOCK_EXECUTIONDATA: u8 = 0x11;

pub const MAGIC_NUMBER: u16 = 0xC0C0;
pub const FORMAT_VERSION: u16 = 0x1007;

/// Upper bound on the probe capacity reserved before the bytes are read
const MAX_RESERVED_PROBES: usize = 64 * 1024;

/// One decoded block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecBlock {
    Header { version: u16 },
    SessionInfo(SessionInfo),
    ExecutionData(ExecutionData),
}

/// Streaming reader for execution data blocks
pub struct ExecutionDataReader<R: Read> {
    input: R,
    first_block: bool,
}

impl<R: Read> ExecutionDataReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            first_block: true,
        }
    }

    /// Read the next block, or `None` at a clean end of stream
    pub fn next_block(&mut self) -> io::Result<Option<ExecBlock>> {
        let block_type = match self.read_block_type()? {
            Some(t) => t,
            None => return Ok(None),
        };

        if self.first_block && block_type != BLOCK_HEADER {
            return Err(invalid_data("Invalid execution data file."));
        }
        self.first_block = false;

        let block = match block_type {
            BLOCK_HEADER => self.read_header()?,
            BLOCK_SESSIONINFO => ExecBlock::SessionInfo(SessionInfo {
                id: self.read_utf()?,
                start: self.read_i64()?,
                dump: self.read_i64()?,
            }),
            BLOCK_EXECUTIONDATA => ExecBlock::ExecutionData(ExecutionData {
                id: self.read_i64()? as u64,
                name: self.read_utf()?,
                probes: self.read_boolean_array()?,
            }),
            other => {
                return Err(invalid_data(format!("Unknown block type {:x}.", other)));
            }
        };
        Ok(Some(block))
    }

    fn read_block_type(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn read_header(&mut self) -> io::Result<ExecBlock> {
        if self.read_u16()? != MAGIC_NUMBER {
            return Err(invalid_data("Invalid execution data file."));
        }
        let version = self.read_u16()?;
        if version != FORMAT_VERSION {
            return Err(invalid_data(format!("Incompatible version {:x}.", version)));
        }
        Ok(ExecBlock::Header { version })
    }

    fn read_u8(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.input.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn read_u16(&mut self) -> io::Result<u16> {
        let mut buf = [0u8; 2];
        self.input.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn read_i64(&mut self) -> io::Result<i64> {
        let mut buf = [0u8; 8];
        self.input.read_exact(&mut buf)?;
        Ok(i64::from_be_bytes(buf))
    }

    fn read_utf(&mut self) -> io::Result<String> {
        let len = self.read_u16()? as usize;
        let mut buf = vec![0u8; len];
        self.input.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|e| invalid_data(e.to_string()))
    }

    fn read_var_int(&mut self) -> io::Result<u32> {
        let mut value: u32 = 0;
        let mut shift = 0;
        loop {
            let byte = self.read_u8()?;
            if shift > 28 {
                return Err(invalid_data("Var-int too long."));
            }
            value |= ((byte & 0x7F) as u32) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    fn read_boolean_array(&mut self) -> io::Result<Vec<bool>> {
        let len = self.read_var_int()? as usize;
        let mut probes = Vec::with_capacity(len.min(MAX_RESERVED_PROBES));
        let mut buffer = 0u8;
        for i in 0..len {
            if i % 8 == 0 {
                buffer = self.read_u8()?;
            }
            probes.push(buffer & 0x01 != 0);
            buffer >>= 1;
        }
        Ok(probes)
    }
}

/// Writer for execution data blocks. The header is written on construction.
pub struct ExecutionDataWriter<W: Write> {
    output: W,
}

impl<W: Write> ExecutionDataWriter<W> {
    pub fn new(mut output: W) -> io::Result<Self> {
        output.write_all(&[BLOCK_HEADER])?;
        output.write_all(&MAGIC_NUMBER.to_be_bytes())?;
        output.write_all(&FORMAT_VERSION.to_be_bytes())?;
        Ok(Self { output })
    }

    pub fn write_session_info(&mut self, info: &SessionInfo) -> io::Result<()> {
        self.output.write_all(&[BLOCK_SESSIONINFO])?;
        self.write_utf(&info.id)?;
        self.output.write_all(&info.start.to_be_bytes())?;
        self.output.write_all(&info.dump.to_be_bytes())
    }

    pub fn write_execution_data(&mut self, data: &ExecutionData) -> io::Result<()> {
        self.output.write_all(&[BLOCK_EXECUTIONDATA])?;
        self.output.write_all(&(data.id as i64).to_be_bytes())?;
        self.write_utf(&data.name)?;
        self.write_boolean_array(&data.probes)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    fn write_utf(&mut self, value: &str) -> io::Result<()> {
        let bytes = value.as_bytes();
        let len = u16::try_from(bytes.len())
            .map_err(|_| invalid_data(format!("String too long: {} bytes", bytes.len())))?;
        self.output.write_all(&len.to_be_bytes())?;
        self.output.write_all(bytes)
    }

    fn write_var_int(&mut self, mut value: u32) -> io::Result<()> {
        loop {
            if value & !0x7F == 0 {
                return self.output.write_all(&[value as u8]);
            }
            self.output.write_all(&[0x80 | (value & 0x7F) as u8])?;
            value >>= 7;
        }
    }

    fn write_boolean_array(&mut self, probes: &[bool]) -> io::Result<()> {
        let len = u32::try_from(probes.len())
            .map_err(|_| invalid_data("Probe array too long"))?;
        self.write_var_int(len)?;
        for chunk in probes.chunks(8) {
            let mut byte = 0u8;
            for (bit, probe) in chunk.iter().enumerate() {
                if *probe {
                    byte |= 1 << bit;
                }
            }
            self.output.write_all(&[byte])?;
        }
        Ok(())
    }
}

fn invalid_data(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.into())
}
