use std::{sync::mpsc::{self, Receiver, RecvTimeoutError}, thread, time::Duration};

/// Key that commits the form from anywhere.
pub const CONFIRM_KEY: &str = "enter";

/// Receives the names of globally pressed keys.
///
/// The OS hook lives on its own thread and only forwards key names; the
/// click job applies them.
pub struct HotkeyListener {
    rx: Receiver<String>,
}

impl HotkeyListener {
    #[cfg(test)]
    pub fn from_receiver(rx: Receiver<String>) -> Self {
        Self { rx }
    }

    /// Starts the process-wide key hook.
    #[cfg(feature = "hooks")]
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("hotkeys".into())
            .spawn(move || {
                let result = rdev::listen(move |event| {
                    if let rdev::EventType::KeyPress(key) = event.event_type {
                        let _ = tx.send(key_name(key));
                    }
                });
                if let Err(e) = result {
                    tracing::error!("global key hook stopped: {e:?}");
                }
            });
        if let Err(e) = spawned {
            tracing::error!("could not start hotkey thread: {e}");
        }
        Self { rx }
    }

    #[cfg(not(feature = "hooks"))]
    pub fn spawn() -> Self {
        tracing::warn!("built without the `hooks` feature; global hotkeys are off");
        let (_tx, rx) = mpsc::channel();
        Self { rx }
    }

    /// Blocks up to `timeout` for a key, then takes everything queued.
    pub fn wait(&self, timeout: Duration) -> Vec<String> {
        match self.rx.recv_timeout(timeout) {
            Ok(first) => std::iter::once(first).chain(self.rx.try_iter()).collect(),
            Err(RecvTimeoutError::Timeout) => Vec::new(),
            // no hook running; still pace the caller
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(timeout);
                Vec::new()
            }
        }
    }
}

/// Lower-case names: "page up", "end", "f6", "a", "1", ...
#[cfg(feature = "hooks")]
pub fn key_name(key: rdev::Key) -> String {
    use rdev::Key::*;
    let name = match key {
        Alt => "alt",
        AltGr => "alt gr",
        Backspace => "backspace",
        CapsLock => "caps lock",
        ControlLeft | ControlRight => "ctrl",
        Delete | KpDelete => "delete",
        DownArrow => "down",
        End => "end",
        Escape => "esc",
        F1 => "f1",
        F2 => "f2",
        F3 => "f3",
        F4 => "f4",
        F5 => "f5",
        F6 => "f6",
        F7 => "f7",
        F8 => "f8",
        F9 => "f9",
        F10 => "f10",
        F11 => "f11",
        F12 => "f12",
        Home => "home",
        LeftArrow => "left",
        MetaLeft | MetaRight => "windows",
        PageDown => "page down",
        PageUp => "page up",
        Return | KpReturn => "enter",
        RightArrow => "right",
        ShiftLeft | ShiftRight => "shift",
        Space => "space",
        Tab => "tab",
        UpArrow => "up",
        PrintScreen => "print screen",
        ScrollLock => "scroll lock",
        Pause => "pause",
        NumLock => "num lock",
        BackQuote => "`",
        Num1 | Kp1 => "1",
        Num2 | Kp2 => "2",
        Num3 | Kp3 => "3",
        Num4 | Kp4 => "4",
        Num5 | Kp5 => "5",
        Num6 | Kp6 => "6",
        Num7 | Kp7 => "7",
        Num8 | Kp8 => "8",
        Num9 | Kp9 => "9",
        Num0 | Kp0 => "0",
        Minus | KpMinus => "-",
        Equal => "=",
        KpPlus => "+",
        KpMultiply => "*",
        KpDivide => "/",
        KeyQ => "q",
        KeyW => "w",
        KeyE => "e",
        KeyR => "r",
        KeyT => "t",
        KeyY => "y",
        KeyU => "u",
        KeyI => "i",
        KeyO => "o",
        KeyP => "p",
        KeyA => "a",
        KeyS => "s",
        KeyD => "d",
        KeyF => "f",
        KeyG => "g",
        KeyH => "h",
        KeyJ => "j",
        KeyK => "k",
        KeyL => "l",
        KeyZ => "z",
        KeyX => "x",
        KeyC => "c",
        KeyV => "v",
        KeyB => "b",
        KeyN => "n",
        KeyM => "m",
        LeftBracket => "[",
        RightBracket => "]",
        SemiColon => ";",
        Quote => "'",
        BackSlash | IntlBackslash => "\\",
        Comma => ",",
        Dot => ".",
        Slash => "/",
        Insert => "insert",
        Function => "fn",
        Unknown(code) => return format!("unknown {code}"),
        #[allow(unreachable_patterns)]
        other => return format!("{other:?}").to_lowercase(),
    };
    name.to_string()
}
