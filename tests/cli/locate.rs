use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, FORM1};

#[test]
fn test_locate_caret_inside_literal() -> Result<()> {
    let test = CliTest::with_file("Form1.cs", FORM1)?;

    let mut cmd = test.locate_command();
    cmd.args(["Form1.cs", "10:30"]);
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    literal: "Test String"  C#
      --> Form1.cs:10:25
       |
    10 |             this.Text = "Test String";
       |                         ^^^^^^^^^^^^^
       = value: Test String

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_locate_inside_comment() -> Result<()> {
    let test = CliTest::with_file("Form1.cs", FORM1)?;

    let mut cmd = test.locate_command();
    cmd.args(["Form1.cs", "9:20"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ No string literal at Form1.cs:9:20

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_locate_raw_selection() -> Result<()> {
    let test = CliTest::with_file("Form1.cs", FORM1)?;

    let mut cmd = test.locate_command();
    cmd.args(["Form1.cs", "5:5", "5:12"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    literal: partial  C#
      --> Form1.cs:5:5
      |
    5 |     partial class Form1
      |     ^^^^^^^
      = value: partial
      = note: no literal encloses the selection, the selected text is used as is

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_locate_unsupported_file() -> Result<()> {
    let test = CliTest::with_file("notes.txt", "\"hello\"")?;

    let mut cmd = test.locate_command();
    cmd.args(["notes.txt", "1:2"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: unsupported file type: notes.txt
    ");

    Ok(())
}

#[test]
fn test_locate_position_out_of_range() -> Result<()> {
    let test = CliTest::with_file("Form1.cs", FORM1)?;

    let mut cmd = test.locate_command();
    cmd.args(["Form1.cs", "99:1"]);
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: position 99:1 is outside Form1.cs
    ");

    Ok(())
}
