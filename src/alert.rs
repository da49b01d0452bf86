use notify_rust::{Notification, Urgency};

// Desktop notification, best-effort: a missing daemon or denied permission
// just drops the toast, never the countdown.
pub fn notify(title: &str, body: &str) {
    let _ = try_notify(title, body);
}

// Used when the user flips the notification toggle on: if the test toast
// can't be delivered, the caller forces the setting back off.
pub fn try_notify(title: &str, body: &str) -> bool {
    Notification::new()
        .summary(title)
        .body(body)
        .appname("ftimer")
        .icon("alarm-clock")
        .urgency(Urgency::Normal)
        .show()
        .is_ok()
}

// Short completion tone through whatever player the system has.
pub fn play_sound() {
    std::thread::spawn(|| {
        for (cmd, file) in [
            ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
            ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
            ("aplay", "/usr/share/sounds/generic.wav"),
        ] {
            if std::path::Path::new(file).exists() {
                let _ = std::process::Command::new(cmd)
                    .arg(file)
                    .stdout(std::process::Stdio::null())
                    .stderr(std::process::Stdio::null())
                    .spawn();
                break;
            }
        }
    });
}
