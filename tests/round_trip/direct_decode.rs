//! Live layouts are never a decode target

use surrogate::codec::{encode_frame, Frame, FrameShape};
use surrogate::{decode, encode, ComplexNumber, Error, InstanceCache, SerializationProxy};

fn live_frame<T: SerializationProxy>(payload: &[u8]) -> Vec<u8> {
    encode_frame(FrameShape::Live, T::TYPE_NAME, T::PROXY_VERSION, payload).unwrap()
}

#[test]
fn live_complex_number_requires_proxy() {
    let mut payload = Vec::new();
    for field in [1.0f64, 0.0, 42.0, 3.0] {
        payload.extend_from_slice(&field.to_le_bytes());
    }
    let err = decode::<ComplexNumber>(&live_frame::<ComplexNumber>(&payload)).unwrap_err();
    assert!(matches!(err, Error::ProxyRequired { ref type_name } if type_name == "ComplexNumber"));
}

#[test]
fn live_instance_cache_requires_proxy() {
    let err = decode::<InstanceCache>(&live_frame::<InstanceCache>(&[])).unwrap_err();
    assert!(matches!(err, Error::ProxyRequired { ref type_name } if type_name == "InstanceCache"));
}

#[test]
fn genuine_proxy_bytes_relabelled_as_live_are_rejected() {
    let bytes = encode(&ComplexNumber::from_coordinates(2.0, 2.0)).unwrap();
    let frame = Frame::parse(&bytes, u32::MAX, true).unwrap();
    let relabelled = live_frame::<ComplexNumber>(frame.payload);
    assert!(matches!(
        decode::<ComplexNumber>(&relabelled),
        Err(Error::ProxyRequired { .. })
    ));
}

#[test]
fn proxy_of_one_type_is_not_another() {
    let bytes = encode(&ComplexNumber::from_coordinates(2.0, 2.0)).unwrap();
    assert!(matches!(
        decode::<InstanceCache>(&bytes),
        Err(Error::DecodingFailure { .. })
    ));
}
