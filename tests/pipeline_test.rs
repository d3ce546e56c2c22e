//! File-level pipeline tests: read a sliced job from disk, transform it,
//! write it back, and check the result as a downstream controller would see it.

use klipperkit::{GcodeStream, MachineProfile, StartPrintProcessor, StartPrintSettings};

const JOB: &str = "\
;FLAVOR:Marlin
;TIME:3912
;Generated with Cura_SteamEngine 5.2.1
T0
M140 S60
M105
M190 S60
M104 S200
M82 ;absolute extrusion mode
G28 ;Home
;LAYER:0
G0 F6000 X100 Y100 Z0.2
;LAYER:1
G0 X101 Y100
";

#[test]
fn process_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("job.gcode");
    std::fs::write(&path, JOB).unwrap();

    let settings = StartPrintSettings {
        nozzle: false,
        material: false,
        standby: false,
        layer: false,
        ..Default::default()
    };
    let profile = MachineProfile::single_extruder();

    let mut stream = GcodeStream::from_file(&path).unwrap();
    StartPrintProcessor::new(&settings, &profile).execute(&mut stream);
    stream.write_to_file(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    let banner = lines
        .iter()
        .position(|l| l.contains("Generated with"))
        .unwrap();
    assert_eq!(
        lines[banner + 1],
        "START_PRINT INITIAL=T0 T0_TEMP=200.0 BED_TEMP=60.0"
    );
    // The layer content is byte-identical to the input
    assert!(written.contains(";LAYER:0\nG0 F6000 X100 Y100 Z0.2\n;LAYER:1\nG0 X101 Y100\n"));
}

#[test]
fn missing_input_is_reported() {
    let result = GcodeStream::from_file(std::path::Path::new("/nonexistent/job.gcode"));
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}
