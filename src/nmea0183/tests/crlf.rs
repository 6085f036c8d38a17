use crate::{
    LineEndingMode,
    error::FrameError,
    nmea0183::line_ending,
};

#[test]
fn test_crlf_required() {
    let res = line_ending("$GPHDT,1*00\r\n", LineEndingMode::Required);
    assert_eq!(res, Ok("$GPHDT,1*00"));

    let res = line_ending("$GPHDT,1*00", LineEndingMode::Required);
    assert_eq!(res, Err(FrameError::LineEnding));

    let res = line_ending("$GPHDT,1*00\n", LineEndingMode::Required);
    assert_eq!(res, Err(FrameError::LineEnding));

    let res = line_ending("$GPHDT,1*00\r", LineEndingMode::Required);
    assert_eq!(res, Err(FrameError::LineEnding));
}

#[test]
fn test_crlf_forbidden() {
    let res = line_ending("12345", LineEndingMode::Forbidden);
    assert_eq!(res, Ok("12345"));

    let res = line_ending("12345\r\n", LineEndingMode::Forbidden);
    assert_eq!(res, Err(FrameError::LineEnding));

    let res = line_ending("12345\n", LineEndingMode::Forbidden);
    assert_eq!(res, Err(FrameError::LineEnding));
}

#[test]
fn test_crlf_optional() {
    assert_eq!(line_ending("12345\r\n", LineEndingMode::Optional), Ok("12345"));
    assert_eq!(line_ending("12345\n", LineEndingMode::Optional), Ok("12345"));
    assert_eq!(line_ending("12345", LineEndingMode::Optional), Ok("12345"));
    assert_eq!(line_ending("12345\r", LineEndingMode::Optional), Ok("12345"));
}
