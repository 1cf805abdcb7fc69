// Inputid sysctl Access
// Reads kernel tunables and device-tree attributes by name

use std::io;

/// Read a raw sysctl value by name.
///
/// Fails with `ErrorKind::Unsupported` on platforms without `sysctlbyname`.
#[cfg(any(target_os = "freebsd", target_os = "dragonfly"))]
pub fn read_raw(name: &str) -> io::Result<Vec<u8>> {
    use std::ffi::CString;
    use std::ptr;

    let cname = CString::new(name)?;
    let mut len: libc::size_t = 0;

    // SAFETY: a null old pointer asks the kernel for the value size only
    let rc = unsafe {
        libc::sysctlbyname(cname.as_ptr(), ptr::null_mut(), &mut len, ptr::null(), 0)
    };
    if rc < 0 {
        return Err(io::Error::last_os_error());
    }

    let mut buf = vec![0u8; len];
    // SAFETY: buf holds len bytes and len is updated to the bytes written
    let rc = unsafe {
        libc::sysctlbyname(
            cname.as_ptr(),
            buf.as_mut_ptr().cast(),
            &mut len,
            ptr::null(),
            0,
        )
    };
    if rc < 0 {
        return Err(io::Error::last_os_error());
    }
    buf.truncate(len);
    Ok(buf)
}

#[cfg(not(any(target_os = "freebsd", target_os = "dragonfly")))]
pub fn read_raw(name: &str) -> io::Result<Vec<u8>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("sysctl {} is not available on this platform", name),
    ))
}

/// Read a string sysctl, dropping the trailing NUL
pub fn read_string(name: &str) -> io::Result<String> {
    let buf = read_raw(name)?;
    Ok(decode_string(&buf))
}

/// Read an integer sysctl
pub fn read_int(name: &str) -> io::Result<i32> {
    let buf = read_raw(name)?;
    decode_int(&buf).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("sysctl {} returned {} bytes, expected an int", name, buf.len()),
        )
    })
}

fn decode_string(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

fn decode_int(buf: &[u8]) -> Option<i32> {
    let bytes: [u8; 4] = buf.get(..4)?.try_into().ok()?;
    Some(i32::from_ne_bytes(bytes))
}
