use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, FORM1};

#[test]
fn test_find_in_file() -> Result<()> {
    let test = CliTest::with_file("Form1.cs", FORM1)?;

    let mut cmd = test.find_command();
    cmd.args(["Form1.cs", "\"Form1\""]);
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    found: "Form1"
      --> Form1.cs:11:25
       |
    11 |             this.Name = "Form1";
       |                         ^^^^^^^

    ✓ Found 1 occurrence of "Form1"

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_find_ignores_comments() -> Result<()> {
    let test = CliTest::with_file("Form1.cs", FORM1)?;

    let mut cmd = test.find_command();
    cmd.args(["--all", "\"not this one\""]);
    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ No occurrences of "not this one" (1 file searched)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_find_across_project() -> Result<()> {
    let test = CliTest::with_file("Form1.cs", FORM1)?;
    test.write_file("Forms/Form2.cs", "class Form2 { string t = \"Test String\"; }\n")?;

    let mut cmd = test.find_command();
    cmd.args(["--all", "\"Test String\""]);
    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    found: "Test String"
      --> Form1.cs:10:25
       |
    10 |             this.Text = "Test String";
       |                         ^^^^^^^^^^^^^

    found: "Test String"
      --> Forms/Form2.cs:1:26
       |
     1 | class Form2 { string t = "Test String"; }
       |                          ^^^^^^^^^^^^^

    ✓ Found 2 occurrences of "Test String"

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_find_requires_file() -> Result<()> {
    let test = CliTest::with_file("Form1.cs", FORM1)?;

    let mut cmd = test.find_command();
    cmd.arg("\"Form1\"");
    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: find takes <file> <raw>, or --all <raw>
    ");

    Ok(())
}
