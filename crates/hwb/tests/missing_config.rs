use std::process::Command;

const REQUIRED: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

#[test]
fn exits_non_zero_for_every_missing_combination() {
    // Empty working dir so no `.env` is picked up.
    let dir = std::env::temp_dir().join(format!("hwb-missing-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    for mask in 0u8..0b111 {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_hwb"));
        cmd.env_clear().current_dir(&dir);
        for (i, name) in REQUIRED.iter().enumerate() {
            if mask & (1 << i) != 0 {
                cmd.env(name, "1");
            }
        }

        let out = cmd.output().unwrap();
        assert!(!out.status.success(), "mask {mask:#b} exited successfully");

        let stderr = String::from_utf8_lossy(&out.stderr);
        for (i, name) in REQUIRED.iter().enumerate() {
            if mask & (1 << i) == 0 {
                assert!(stderr.contains(name), "mask {mask:#b}: {name} not reported\n{stderr}");
            }
        }
        for line in [
            "polling homework statuses",
            "notifier started",
            "requesting homework statuses",
        ] {
            assert!(
                !stderr.contains(line),
                "mask {mask:#b}: loop started without credentials\n{stderr}"
            );
        }
    }

    let _ = std::fs::remove_dir_all(&dir);
}
