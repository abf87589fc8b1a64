//! Terminal-backed display.
//!
//! Puts the controlling terminal in raw mode with SGR mouse reporting,
//! decodes its escape stream into the input snapshot, and repaints the cell
//! screen with 24-bit SGR colors, row-diffed against the previous frame.

#[cfg(unix)]
use std::fs::OpenOptions;
use std::io::{self, Write};
#[cfg(unix)]
use std::path::PathBuf;
#[cfg(unix)]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(unix)]
use std::sync::Arc;
#[cfg(unix)]
use std::thread::JoinHandle;

#[cfg(unix)]
use libc::c_int;
use once_cell::sync::Lazy;
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::EnvConfig;
use crate::core::geometry::{Point, Size};
use crate::core::input::{InputSnapshot, Key};
use crate::platform::Display;
use crate::render::{Surface, CONTINUATION};

const ENTER_SEQ: &str = "\x1b[?1049h\x1b[?25l";
const EXIT_SEQ: &str = "\x1b[?25h\x1b[?1049l";
const MOUSE_ON_SEQ: &str = "\x1b[?1002h\x1b[?1006h";
const MOUSE_OFF_SEQ: &str = "\x1b[?1006l\x1b[?1002l";

static ESCAPE_KEYS: Lazy<Vec<(&'static [u8], Key)>> = Lazy::new(|| {
    vec![
        (b"\x1b[A".as_slice(), Key::Up),
        (b"\x1b[B".as_slice(), Key::Down),
        (b"\x1b[C".as_slice(), Key::Right),
        (b"\x1b[D".as_slice(), Key::Left),
        (b"\x1bOA".as_slice(), Key::Up),
        (b"\x1bOB".as_slice(), Key::Down),
        (b"\x1bOC".as_slice(), Key::Right),
        (b"\x1bOD".as_slice(), Key::Left),
        (b"\x1b[3~".as_slice(), Key::Delete),
    ]
});

fn match_escape(buffer: &[u8]) -> Option<(Key, usize)> {
    ESCAPE_KEYS
        .iter()
        .find(|(seq, _)| buffer.starts_with(seq))
        .map(|(seq, key)| (*key, seq.len()))
}

enum MouseParse {
    Incomplete,
    Invalid,
    Complete {
        consumed: usize,
        button: u32,
        pos: Point,
        press: bool,
    },
}

/// Parse one `ESC [ < b ; x ; y (M|m)` SGR mouse report.
fn parse_sgr_mouse(buffer: &[u8]) -> MouseParse {
    for (i, &byte) in buffer.iter().enumerate().skip(3) {
        if byte == b'M' || byte == b'm' {
            let body = match std::str::from_utf8(&buffer[3..i]) {
                Ok(body) => body,
                Err(_) => return MouseParse::Invalid,
            };
            let mut parts = body.split(';');
            let (Some(button), Some(x), Some(y)) = (parts.next(), parts.next(), parts.next())
            else {
                return MouseParse::Invalid;
            };
            let (Ok(button), Ok(x), Ok(y)) =
                (button.parse::<u32>(), x.parse::<i32>(), y.parse::<i32>())
            else {
                return MouseParse::Invalid;
            };
            return MouseParse::Complete {
                consumed: i + 1,
                button,
                pos: Point::new(x - 1, y - 1),
                press: byte == b'M',
            };
        }
        if !(byte.is_ascii_digit() || byte == b';') || i > 32 {
            return MouseParse::Invalid;
        }
    }
    MouseParse::Incomplete
}

fn apply_mouse(input: &mut InputSnapshot, button: u32, pos: Point, press: bool) {
    input.move_mouse(pos);
    if button & 64 != 0 {
        if press {
            input.add_scroll(if button & 1 == 0 { 1 } else { -1 });
        }
        return;
    }
    if button & 32 != 0 {
        return; // motion while held; position already applied
    }
    if button & 3 == 0 {
        if press {
            input.press_mouse();
        } else {
            input.release_mouse();
        }
    }
}

/// Decode buffered terminal bytes into the snapshot. Returns unconsumed
/// trailing bytes (incomplete sequences wait for the next pump).
fn decode_input(buffer: &mut Vec<u8>, input: &mut InputSnapshot, esc_pending: &mut bool) {
    loop {
        if buffer.is_empty() {
            return;
        }

        if buffer.starts_with(b"\x1b[<") {
            match parse_sgr_mouse(buffer) {
                MouseParse::Complete {
                    consumed,
                    button,
                    pos,
                    press,
                } => {
                    apply_mouse(input, button, pos, press);
                    buffer.drain(..consumed);
                    continue;
                }
                MouseParse::Incomplete => return,
                MouseParse::Invalid => {
                    buffer.drain(..3);
                    continue;
                }
            }
        }

        if buffer[0] == 0x1b {
            if let Some((key, len)) = match_escape(buffer) {
                input.press_key(key);
                input.release_key(key);
                buffer.drain(..len);
                *esc_pending = false;
                continue;
            }
            if buffer.len() == 1 {
                // A lone ESC could be the prefix of a split sequence; emit
                // it only if it also stood alone on the previous pump.
                if *esc_pending {
                    input.press_key(Key::Escape);
                    input.release_key(Key::Escape);
                    buffer.clear();
                    *esc_pending = false;
                } else {
                    *esc_pending = true;
                }
                return;
            }
            // Unknown escape: skip the whole CSI sequence, or the ESC plus
            // one byte for two-byte sequences.
            if buffer[1] == b'[' {
                match buffer[2..].iter().position(|&b| (0x40..=0x7e).contains(&b)) {
                    Some(end) => {
                        buffer.drain(..end + 3);
                    }
                    None => return,
                }
            } else {
                buffer.drain(..2);
            }
            continue;
        }

        match buffer[0] {
            b'\r' | b'\n' => {
                input.press_key(Key::Enter);
                input.release_key(Key::Enter);
                buffer.drain(..1);
            }
            b'\t' => {
                input.press_key(Key::Tab);
                input.release_key(Key::Tab);
                buffer.drain(..1);
            }
            0x7f | 0x08 => {
                input.press_key(Key::Backspace);
                input.release_key(Key::Backspace);
                buffer.drain(..1);
            }
            0x03 => {
                input.request_quit();
                buffer.drain(..1);
            }
            0x00..=0x1f => {
                buffer.drain(..1);
            }
            _ => {
                let run_end = buffer
                    .iter()
                    .position(|&b| b < 0x20 || b == 0x7f)
                    .unwrap_or(buffer.len());
                match std::str::from_utf8(&buffer[..run_end]) {
                    Ok(text) => {
                        input.push_text(text);
                        buffer.drain(..run_end);
                    }
                    Err(err) if err.valid_up_to() > 0 => {
                        let valid = err.valid_up_to();
                        let text = String::from_utf8_lossy(&buffer[..valid]).into_owned();
                        input.push_text(&text);
                        buffer.drain(..valid);
                    }
                    Err(_) if run_end == buffer.len() => return, // split UTF-8 char
                    Err(_) => {
                        buffer.drain(..1);
                    }
                }
            }
        }
    }
}

/// Render one screen row as an SGR-colored string, coalescing color runs.
fn render_row(out: &mut String, y: i32, screen: &Surface) {
    use std::fmt::Write as _;

    let _ = write!(out, "\x1b[{};1H", y + 1);
    let mut current = None;
    for cell in screen.row(y) {
        if cell.ch == CONTINUATION {
            continue;
        }
        let colors = (cell.fg, cell.bg);
        if current != Some(colors) {
            let _ = write!(
                out,
                "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m",
                cell.fg.r, cell.fg.g, cell.fg.b, cell.bg.r, cell.bg.g, cell.bg.b
            );
            current = Some(colors);
        }
        out.push(cell.ch);
    }
    out.push_str("\x1b[0m");
}

#[cfg(unix)]
fn get_termios(fd: c_int) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

#[cfg(unix)]
fn set_termios(fd: c_int, termios: &libc::termios) -> io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(unix)]
fn poll_readable(fd: c_int, timeout_ms: i32) -> bool {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    result > 0 && (fds.revents & libc::POLLIN) != 0
}

#[cfg(unix)]
pub struct TermDisplay {
    size: Size,
    stdin_fd: c_int,
    original_termios: Option<libc::termios>,
    mouse_enabled: bool,
    quit_flag: Arc<AtomicBool>,
    signal_handle: Option<signal_hook::iterator::Handle>,
    signal_thread: Option<JoinHandle<()>>,
    buffer: Vec<u8>,
    esc_pending: bool,
    prev: Option<Surface>,
    debug: bool,
    write_log_path: Option<PathBuf>,
    write_log_failed: bool,
}

#[cfg(unix)]
impl TermDisplay {
    pub fn new(size: Size) -> io::Result<Self> {
        let config = EnvConfig::from_env();
        let stdin_fd = libc::STDIN_FILENO;

        let original = get_termios(stdin_fd)?;
        let mut raw = original;
        unsafe {
            libc::cfmakeraw(&mut raw);
        }
        set_termios(stdin_fd, &raw)?;

        let quit_flag = Arc::new(AtomicBool::new(false));
        let mut signals = Signals::new([libc::SIGINT, libc::SIGTERM])
            .map_err(|err| io::Error::other(format!("failed to register signals: {err}")))?;
        let signal_handle = signals.handle();
        let flag = Arc::clone(&quit_flag);
        let signal_thread = std::thread::spawn(move || {
            if signals.forever().next().is_some() {
                flag.store(true, Ordering::SeqCst);
            }
        });

        let mouse_enabled = !config.no_mouse;
        let mut display = Self {
            size,
            stdin_fd,
            original_termios: Some(original),
            mouse_enabled,
            quit_flag,
            signal_handle: Some(signal_handle),
            signal_thread: Some(signal_thread),
            buffer: Vec::new(),
            esc_pending: false,
            prev: None,
            debug: config.debug,
            write_log_path: config.write_log.map(PathBuf::from),
            write_log_failed: false,
        };

        display.write_control(ENTER_SEQ)?;
        if mouse_enabled {
            display.write_control(MOUSE_ON_SEQ)?;
        }
        Ok(display)
    }

    fn write_control(&mut self, data: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data.as_bytes())?;
        stdout.flush()?;
        self.log_output(data);
        Ok(())
    }

    fn log_output(&mut self, data: &str) {
        if self.write_log_failed {
            return;
        }
        if let Some(path) = self.write_log_path.as_ref() {
            let result = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut file| file.write_all(data.as_bytes()));
            if result.is_err() {
                self.write_log_failed = true;
            }
        }
    }
}

#[cfg(unix)]
impl Display for TermDisplay {
    fn size(&self) -> Size {
        self.size
    }

    fn pump(&mut self, input: &mut InputSnapshot) -> io::Result<()> {
        if self.quit_flag.load(Ordering::SeqCst) {
            input.request_quit();
        }

        let mut chunk = [0u8; 4096];
        while poll_readable(self.stdin_fd, 0) {
            let read_len = unsafe {
                libc::read(
                    self.stdin_fd,
                    chunk.as_mut_ptr() as *mut libc::c_void,
                    chunk.len(),
                )
            };
            if read_len <= 0 {
                break;
            }
            self.buffer.extend_from_slice(&chunk[..read_len as usize]);
        }

        decode_input(&mut self.buffer, input, &mut self.esc_pending);
        if self.debug && !self.buffer.is_empty() {
            log::debug!("input: {} bytes awaiting completion", self.buffer.len());
        }
        Ok(())
    }

    fn present(&mut self, screen: &Surface) -> io::Result<()> {
        let mut out = String::new();
        for y in 0..screen.height() {
            let unchanged = self
                .prev
                .as_ref()
                .is_some_and(|prev| prev.height() == screen.height() && prev.row(y) == screen.row(y));
            if !unchanged {
                render_row(&mut out, y, screen);
            }
        }
        if !out.is_empty() {
            let mut stdout = io::stdout().lock();
            stdout.write_all(out.as_bytes())?;
            stdout.flush()?;
            self.log_output(&out);
        }
        self.prev = Some(screen.clone());
        Ok(())
    }
}

#[cfg(unix)]
impl Drop for TermDisplay {
    fn drop(&mut self) {
        if self.mouse_enabled {
            let _ = self.write_control(MOUSE_OFF_SEQ);
        }
        let _ = self.write_control(EXIT_SEQ);
        if let Some(original) = self.original_termios.take() {
            let _ = set_termios(self.stdin_fd, &original);
        }
        if let Some(handle) = self.signal_handle.take() {
            handle.close();
        }
        if let Some(thread) = self.signal_thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(not(unix))]
pub struct TermDisplay {
    size: Size,
}

#[cfg(not(unix))]
impl TermDisplay {
    pub fn new(_size: Size) -> io::Result<Self> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "TermDisplay is only supported on Unix platforms",
        ))
    }
}

#[cfg(not(unix))]
impl Display for TermDisplay {
    fn size(&self) -> Size {
        self.size
    }

    fn pump(&mut self, _input: &mut InputSnapshot) -> io::Result<()> {
        Ok(())
    }

    fn present(&mut self, _screen: &Surface) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::decode_input;
    use crate::core::geometry::Point;
    use crate::core::input::{InputSnapshot, Key};

    fn decode(bytes: &[u8]) -> (InputSnapshot, Vec<u8>) {
        let mut buffer = bytes.to_vec();
        let mut input = InputSnapshot::new();
        let mut esc_pending = false;
        decode_input(&mut buffer, &mut input, &mut esc_pending);
        (input, buffer)
    }

    #[test]
    fn arrows_enter_and_text_decode() {
        let (input, rest) = decode(b"\x1b[Bab\r");
        assert!(input.pressed(Key::Down));
        assert!(input.pressed(Key::Enter));
        assert_eq!(input.text, "ab");
        assert!(rest.is_empty());
    }

    #[test]
    fn sgr_mouse_click_and_wheel_decode() {
        let (input, rest) = decode(b"\x1b[<0;13;4M");
        assert_eq!(input.mouse, Point::new(12, 3));
        assert!(input.click_started);
        assert!(input.mouse_down);
        assert!(rest.is_empty());

        let (input, _) = decode(b"\x1b[<64;2;2M\x1b[<65;2;2M\x1b[<65;2;2M");
        assert_eq!(input.scroll, -1, "one wheel-up and two wheel-downs");
    }

    #[test]
    fn incomplete_sequences_wait_for_more_bytes() {
        let (input, rest) = decode(b"\x1b[<0;13");
        assert!(!input.click_started);
        assert_eq!(rest, b"\x1b[<0;13");

        let (input, rest) = decode(b"x\xe4");
        assert_eq!(input.text, "x");
        assert_eq!(rest, b"\xe4", "split UTF-8 char stays buffered");
    }

    #[test]
    fn lone_escape_requires_two_pumps() {
        let mut buffer = b"\x1b".to_vec();
        let mut input = InputSnapshot::new();
        let mut esc_pending = false;
        decode_input(&mut buffer, &mut input, &mut esc_pending);
        assert!(!input.pressed(Key::Escape));
        assert!(esc_pending);

        decode_input(&mut buffer, &mut input, &mut esc_pending);
        assert!(input.pressed(Key::Escape));
        assert!(buffer.is_empty());
    }

    #[test]
    fn ctrl_c_requests_quit() {
        let (input, _) = decode(b"\x03");
        assert!(input.quit);
    }
}
