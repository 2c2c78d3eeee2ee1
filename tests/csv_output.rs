use std::process::Command;

const HEADER: &str =
    "locktype,thread_num,iterations,trial,elapsed_ns,throughput,counter,expected,correct";

#[test]
fn verbose_csv_keeps_stdout_to_records() {
    let output = Command::new(env!("CARGO_BIN_EXE_spinlock-bench"))
        .args(["-t", "2", "-i", "10", "-l", "tas,alock", "-f", "csv", "-v"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "{}", stdout);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].starts_with("TAS,2,10,0,"));
    assert!(lines[2].starts_with("ALock,2,10,0,"));
    assert!(lines[1..].iter().all(|l| l.ends_with(",20,20,true")));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Thread 0 finished with result 10"));
    assert!(stderr.contains("Thread 1 finished with result 10"));
}
