use std::{
    fs::File,
    path::Path,
    io::{
        Read, Write, BufReader, BufWriter,
        BufRead, ErrorKind
    },
};

use crate::error;

/// A trait for handling buffered reading of the little-endian primitives
/// that make up a checkpoint record (see `checkpoint`).
pub trait BufferedRead {
    fn read_byte(&mut self) -> u8;
    fn read_i32(&mut self) -> i32;
    fn read_u32(&mut self) -> u32;
    fn read_u64(&mut self) -> u64;
    fn read_f64(&mut self) -> f64;
}
impl BufferedRead for BufReader<File> {
    /// Read one byte from an input file.
    fn read_byte(&mut self) -> u8 {
        let mut byte = [0u8; 1];

        if self.read(&mut byte).is_ok() {
            if self.buffer().is_empty() {
                self.consume(self.capacity());

                if let Err(e) = self.fill_buf() {
                    println!("Function read_byte failed.");
                    println!("Error: {}", e);
                }
            }
        }
        else {
            println!("Function read_byte failed.");
        }
        u8::from_le_bytes(byte)
    }
    fn read_i32(&mut self) -> i32 {
        i32::from_le_bytes(self.read_bytes4())
    }
    fn read_u32(&mut self) -> u32 {
        u32::from_le_bytes(self.read_bytes4())
    }
    /// Read 8 bytes from an input file, taking care to handle reading
    /// across buffer boundaries.
    fn read_u64(&mut self) -> u64 {
        u64::from_le_bytes(self.read_bytes8())
    }
    fn read_f64(&mut self) -> f64 {
        f64::from_le_bytes(self.read_bytes8())
    }
}

// Shared fixed-width read helpers backing read_i32/read_u32/read_u64/read_f64.
trait ReadBytes {
    fn read_bytes4(&mut self) -> [u8; 4];
    fn read_bytes8(&mut self) -> [u8; 8];
}
impl ReadBytes for BufReader<File> {
    fn read_bytes4(&mut self) -> [u8; 4] {
        let mut bytes = [0u8; 4];
        self.read_exact_buffered(&mut bytes);
        bytes
    }
    fn read_bytes8(&mut self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        self.read_exact_buffered(&mut bytes);
        bytes
    }
}
trait ReadExactBuffered {
    fn read_exact_buffered(&mut self, bytes: &mut [u8]);
}
impl ReadExactBuffered for BufReader<File> {
    fn read_exact_buffered(&mut self, bytes: &mut [u8]) {
        if let Ok(len) = self.read(bytes) {
            if self.buffer().is_empty() {
                self.consume(self.capacity());

                if let Err(e) = self.fill_buf() {
                    println!("Function read_exact_buffered failed.");
                    println!("Error: {}", e);
                }
                if len < bytes.len() {
                    self.read_exact(&mut bytes[len..]).unwrap();
                }
            }
        }
        else {
            println!("Function read_exact_buffered failed.");
        }
    }
}

/// A trait for handling buffered writing of the little-endian primitives
/// that make up a checkpoint record.
pub trait BufferedWrite {
    fn write_byte(&mut self, output: u8);
    fn write_i32(&mut self, output: i32);
    fn write_u32(&mut self, output: u32);
    fn write_u64(&mut self, output: u64);
    fn write_f64(&mut self, output: f64);
    fn flush_buffer(&mut self);
}
impl BufferedWrite for BufWriter<File> {
    /// Write one byte to an output file.
    fn write_byte(&mut self, output: u8) {
        self.write_bytes(&[output]);
    }
    fn write_i32(&mut self, output: i32) {
        self.write_bytes(&output.to_le_bytes());
    }
    fn write_u32(&mut self, output: u32) {
        self.write_bytes(&output.to_le_bytes());
    }
    /// Write 8 bytes to an output file.
    fn write_u64(&mut self, output: u64) {
        self.write_bytes(&output.to_le_bytes());
    }
    fn write_f64(&mut self, output: f64) {
        self.write_bytes(&output.to_le_bytes());
    }

    /// Flush buffer to file.
    fn flush_buffer(&mut self) {
        if let Err(e) = self.flush() {
            println!("Function flush_buffer failed.");
            println!("Error: {}", e);
        }
    }
}

trait WriteBytes {
    fn write_bytes(&mut self, bytes: &[u8]);
}
impl WriteBytes for BufWriter<File> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        if let Err(e) = self.write(bytes) {
            println!("Function write_bytes failed.");
            println!("Error: {}", e);
        }

        if self.buffer().len() >= self.capacity() {
            if let Err(e) = self.flush() {
                println!("Function write_bytes failed.");
                println!("Error: {}", e);
            }
        }
    }
}

/// Takes a file path and returns an input file wrapped in a BufReader.
pub fn new_input_file(capacity: usize, path: &Path) -> BufReader<File> {
    BufReader::with_capacity(
        capacity,
        match File::open(path) {
            Ok(file) => file,
            Err(_) => error::missing_dataset(path),
        }
    )
}

/// Takes a file path and returns an output file wrapped in a BufWriter,
/// creating (and truncating) it if necessary.
pub fn new_output_file(capacity: usize, path: &Path) -> BufWriter<File> {
    match File::create(path) {
        Ok(file) => BufWriter::with_capacity(capacity, file),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => {
                println!("Couldn't create {}: parent directory is missing.", path.display());
                std::process::exit(1);
            }
            _ => {
                println!("Couldn't create {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }
}

/// Returns an existing checkpoint file opened for reading, or `None` if it
/// does not exist yet — resuming from a checkpoint is optional (`-r`), so a
/// missing file is not itself a fatal condition.
pub fn try_open_checkpoint(path: &Path) -> Option<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Some(BufReader::with_capacity(4096, file)),
        Err(_) => None,
    }
}
