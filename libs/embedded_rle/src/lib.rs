/*!
A no_std byte run-length codec and length-prefixed frame container using
embedded-io, small enough to unpack frames on a microcontroller.

## Run format
Every run is two bytes, `count` then `value`, with `count` in `1..=255`.
Longer runs of the same byte are split greedily into runs of 255.

## Container format
A container is a plain concatenation of records, one per frame:
a little-endian `u16` payload length followed by that many payload bytes.
There is no header, frame count or checksum.

## Usage
```
# use embedded_rle as rle;
# fn main() -> Result<(), rle::RleError> {
let packed = [0u8; 8];
let payload = rle::encode(&packed);
assert_eq!(payload, [8, 0]);

let mut container = Vec::<u8>::new();
rle::write_frame(&mut container, &payload)?;
assert_eq!(container, [2, 0, 8, 0]);

let mut input = container.as_slice();
let mut reader = rle::FrameReader::new(&mut input);
let mut frame = Vec::new();
while reader.next_frame(&mut frame)? {
    assert_eq!(rle::decode(&frame)?, packed);
}
# Ok(())
# }
```
*/

#![no_std]

mod codec;
mod container;
mod error;


extern crate alloc;

pub use codec::{MAX_RUN, Run, Runs, decode, decode_into, decoded_len, encode, encode_into, runs};
pub use container::{
    FrameReader, LENGTH_PREFIX_SIZE, MAX_PAYLOAD_SIZE, record_size, write_container, write_frame,
};
pub use error::RleError;

pub type Result<T> = core::result::Result<T, RleError>;
