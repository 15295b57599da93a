//! Minimal class file parser
//!
//! Only the constant pool and the `this_class` index are decoded; that is all
//! the analyzer needs to name a class.

use std::fmt;

pub const CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// Facts read from a class file header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// VM name, e.g. `com/acme/Foo`
    pub name: String,
    pub major_version: u16,
}

/// Why a class file could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFormatError(pub String);

impl fmt::Display for ClassFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ClassFormatError {}

#[derive(Debug, Clone)]
enum Constant {
    Utf8(String),
    Class(u16),
    Other,
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], ClassFormatError> {
        let end = self.pos.checked_add(n).filter(|end| *end <= self.bytes.len());
        match end {
            Some(end) => {
                let slice = &self.bytes[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(ClassFormatError(format!(
                "unexpected end of class file at offset {}",
                self.pos
            ))),
        }
    }

    fn u8(&mut self) -> Result<u8, ClassFormatError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ClassFormatError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ClassFormatError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Check whether `bytes` starts with the class file magic number
pub fn is_class_file(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) == CLASS_MAGIC
}

/// Parse the class name out of a class file
pub fn parse_class_info(bytes: &[u8]) -> Result<ClassInfo, ClassFormatError> {
    let mut cursor = Cursor { bytes, pos: 0 };

    if cursor.u32()? != CLASS_MAGIC {
        return Err(ClassFormatError("missing class file magic number".to_string()));
    }
    let _minor = cursor.u16()?;
    let major_version = cursor.u16()?;

    let pool_count = cursor.u16()? as usize;
    let mut pool: Vec<Constant> = vec![Constant::Other; pool_count.max(1)];
    let mut index = 1;
    while index < pool_count {
        let tag = cursor.u8()?;
        let constant = match tag {
            1 => {
                let len = cursor.u16()? as usize;
                Constant::Utf8(String::from_utf8_lossy(cursor.take(len)?).into_owned())
            }
            7 => Constant::Class(cursor.u16()?),
            3 | 4 => {
                cursor.take(4)?;
                Constant::Other
            }
            5 | 6 => {
                cursor.take(8)?;
                // Long and double occupy two pool slots
                pool[index] = Constant::Other;
                index += 1;
                Constant::Other
            }
            8 | 16 | 19 | 20 => {
                cursor.take(2)?;
                Constant::Other
            }
            9 | 10 | 11 | 12 | 17 | 18 => {
                cursor.take(4)?;
                Constant::Other
            }
            15 => {
                cursor.take(3)?;
                Constant::Other
            }
            other => {
                return Err(ClassFormatError(format!(
                    "unknown constant pool tag {} at index {}",
                    other, index
                )));
            }
        };
        if index < pool_count {
            pool[index] = constant;
        }
        index += 1;
    }

    let _access_flags = cursor.u16()?;
    let this_class = cursor.u16()? as usize;

    let name_index = match pool.get(this_class) {
        Some(Constant::Class(name_index)) => *name_index as usize,
        _ => {
            return Err(ClassFormatError(format!(
                "this_class index {} is not a class constant",
                this_class
            )));
        }
    };
    match pool.get(name_index) {
        Some(Constant::Utf8(name)) => Ok(ClassInfo {
            name: name.clone(),
            major_version,
        }),
        _ => Err(ClassFormatError(format!(
            "class name index {} is not a UTF-8 constant",
            name_index
        ))),
    }
}

/// Build the bytes of a minimal, valid class file. Used by tests that need
/// real class files on disk.
pub fn minimal_class_bytes(name: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&CLASS_MAGIC.to_be_bytes());
    bytes.extend_from_slice(&0u16.to_be_bytes());
    bytes.extend_from_slice(&52u16.to_be_bytes());
    // #1 Utf8 name, #2 Class #1, #3 Utf8 java/lang/Object, #4 Class #3
    bytes.extend_from_slice(&5u16.to_be_bytes());
    for utf8 in [name, "java/lang/Object"] {
        bytes.push(1);
        bytes.extend_from_slice(&(utf8.len() as u16).to_be_bytes());
        bytes.extend_from_slice(utf8.as_bytes());
        bytes.push(7);
        let class_index = if utf8 == name { 1u16 } else { 3u16 };
        bytes.extend_from_slice(&class_index.to_be_bytes());
    }
    bytes.extend_from_slice(&0x0021u16.to_be_bytes()); // public super
    bytes.extend_from_slice(&2u16.to_be_bytes()); // this_class
    bytes.extend_from_slice(&4u16.to_be_bytes()); // super_class
    bytes.extend_from_slice(&0u16.to_be_bytes()); // interfaces
    bytes.extend_from_slice(&0u16.to_be_bytes()); // fields
    bytes.extend_from_slice(&0u16.to_be_bytes()); // methods
    bytes.extend_from_slice(&0u16.to_be_bytes()); // attributes
    bytes
}
