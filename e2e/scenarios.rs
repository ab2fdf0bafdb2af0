//! Six end-to-end scenarios, each as one test: a complete save/append/
//! load/list flow through the public API rather than internal module
//! calls.

use std::fs;
use std::io::Write as _;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use matfive::{append_cube, list_rank_2, list_rank_3, load_by_name_rank3, save_cube, Cube, DataType};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn header_bytes(description: &str) -> [u8; 128] {
    let mut header = [0u8; 128];
    let desc = description.as_bytes();
    let n = desc.len().min(116);
    header[..n].copy_from_slice(&desc[..n]);
    header[124..126].copy_from_slice(&0x0100u16.to_le_bytes());
    header[126..128].copy_from_slice(b"IM");
    header
}

fn long_tag(type_code: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + payload.len() + 8);
    out.extend_from_slice(&type_code.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    let pad = (8 - payload.len() % 8) % 8;
    out.extend(std::iter::repeat(0u8).take(pad));
    out
}

/// Hand-builds a type-14 matrix element's bytes directly, bypassing
/// [`Cube`]'s invariant checks — needed for scenario 4, where the point is
/// a real-data payload shorter than `dims` imply.
fn matrix_bytes(class_code: u8, dims: &[u32], name: &str, data_type_code: u32, data: &[u8]) -> Vec<u8> {
    let mut flags_payload = [0u8; 8];
    flags_payload[0] = class_code;
    let array_flags = long_tag(6, &flags_payload);

    let mut dims_payload = Vec::with_capacity(dims.len() * 4);
    for &d in dims {
        dims_payload.extend_from_slice(&d.to_le_bytes());
    }
    let dimensions = long_tag(5, &dims_payload);

    let name_element = long_tag(1, name.as_bytes());
    let data_element = long_tag(data_type_code, data);

    let mut payload = Vec::with_capacity(
        array_flags.len() + dimensions.len() + name_element.len() + data_element.len(),
    );
    payload.extend(array_flags);
    payload.extend(dimensions);
    payload.extend(name_element);
    payload.extend(data_element);

    long_tag(14, &payload)
}

/// Scenario 1: a minimal file — header plus one uncompressed matrix named
/// `"A"`, dims (2,2,2), uint8, values 0..7 in column-major order.
#[test]
fn scenario_1_minimal_uncompressed_file() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s1.mat");
    let values: Vec<u8> = (0u8..8).collect();
    let element = matrix_bytes(9, &[2, 2, 2], "A", 2, &values);

    let mut file = fs::File::create(&path).unwrap();
    file.write_all(&header_bytes("scenario 1")).unwrap();
    file.write_all(&element).unwrap();
    drop(file);

    let listed = list_rank_3(&path).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "A");
    assert_eq!(listed[0].dims, [2, 2, 2]);
    assert_eq!(listed[0].dtype, DataType::Uint8);

    let (descriptor, cube) = matfive::load_first_of_rank_3(&path).unwrap().unwrap();
    assert_eq!(descriptor.name, "A");
    assert_eq!(cube.data(), &[0, 1, 2, 3, 4, 5, 6, 7]);
}

/// Scenario 2: the same matrix as scenario 1, wrapped in a compressed
/// element — the observable result is identical.
#[test]
fn scenario_2_same_content_compressed() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s2.mat");
    let values: Vec<u8> = (0u8..8).collect();
    let element = matrix_bytes(9, &[2, 2, 2], "A", 2, &values);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&element).unwrap();
    let compressed = encoder.finish().unwrap();
    let wrapped = long_tag(15, &compressed);

    let mut file = fs::File::create(&path).unwrap();
    file.write_all(&header_bytes("scenario 2")).unwrap();
    file.write_all(&wrapped).unwrap();
    drop(file);

    let listed = list_rank_3(&path).unwrap();
    assert_eq!(listed, vec![matfive::MatrixDescriptor { name: "A".to_string(), dims: [2, 2, 2], dtype: DataType::Uint8 }]);

    let (_, cube) = matfive::load_first_of_rank_3(&path).unwrap().unwrap();
    assert_eq!(cube.data(), &[0, 1, 2, 3, 4, 5, 6, 7]);
}

/// Scenario 3: a file with two matrices of different ranks; rank-filtered
/// listing and load-by-name both see only their own rank.
#[test]
fn scenario_3_two_matrices_different_ranks() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s3.mat");

    let img = Cube::new(3.14f64.to_le_bytes().to_vec(), [1, 1, 1], 3, DataType::Float64).unwrap();
    save_cube(&path, "scenario 3", "img", &img).unwrap();

    let mut lambda_data = Vec::with_capacity(24);
    for v in [400.0f64, 500.0, 600.0] {
        lambda_data.extend_from_slice(&v.to_le_bytes());
    }
    let lambda = Cube::new(lambda_data, [3, 1, 1], 2, DataType::Float64).unwrap();
    append_cube(&path, "scenario 3", "lambda", &lambda).unwrap();

    let rank3 = list_rank_3(&path).unwrap();
    assert_eq!(rank3.len(), 1);
    assert_eq!(rank3[0].name, "img");
    assert_eq!(rank3[0].dims, [1, 1, 1]);

    let rank2 = list_rank_2(&path).unwrap();
    assert_eq!(rank2.len(), 1);
    assert_eq!(rank2[0].name, "lambda");
    assert_eq!(rank2[0].dims, [3, 1, 1]);

    let (_, loaded) = matfive::load_by_name_rank2(&path, "lambda").unwrap().unwrap();
    let recovered: Vec<f64> =
        loaded.data().chunks_exact(8).map(|c| f64::from_le_bytes(c.try_into().unwrap())).collect();
    assert_eq!(recovered, vec![400.0, 500.0, 600.0]);
}

/// Scenario 4: a rank-3 int16 matrix whose real-data payload is shorter
/// than `dims` implies is reported unsupported, not loaded.
#[test]
fn scenario_4_undersized_payload_is_unsupported() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s4.mat");
    // dims (2,1,1) of int16 implies 4 bytes; this payload carries only 2.
    let element = matrix_bytes(10, &[2, 1, 1], "M", 3, &[0x01, 0x02]);

    let mut file = fs::File::create(&path).unwrap();
    file.write_all(&header_bytes("scenario 4")).unwrap();
    file.write_all(&element).unwrap();
    drop(file);

    assert!(list_rank_3(&path).unwrap().is_empty());
    assert!(matfive::load_first_of_rank_3(&path).unwrap().is_none());
}

/// Scenario 5: a cube saved, then reopened fresh, loads back byte-identical
/// by name and rank.
#[test]
fn scenario_5_save_close_reopen_load_by_name() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s5.mat");
    let values: Vec<u8> = (1u8..=6).flat_map(|v| (v as u16).to_le_bytes()).collect();
    let cube = Cube::new(values.clone(), [3, 2, 1], 3, DataType::Uint16).unwrap();
    save_cube(&path, "scenario 5", "cube", &cube).unwrap();
    drop(cube);

    let (descriptor, loaded) = load_by_name_rank3(&path, "cube").unwrap().unwrap();
    assert_eq!(descriptor.dims, [3, 2, 1]);
    assert_eq!(loaded.data(), values.as_slice());
}

/// Scenario 6: a fresh file holding the scenario-5 cube, with a rank-2
/// wavelength vector appended afterward; both survive a re-list and re-load.
#[test]
fn scenario_6_append_wavelengths_after_cube() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s6.mat");
    let cube_values: Vec<u8> = (1u8..=6).flat_map(|v| (v as u16).to_le_bytes()).collect();
    let cube = Cube::new(cube_values.clone(), [3, 2, 1], 3, DataType::Uint16).unwrap();
    save_cube(&path, "scenario 6", "cube", &cube).unwrap();

    let mut wl_data = Vec::with_capacity(32);
    for v in [1.0f64, 2.0, 3.0, 4.0] {
        wl_data.extend_from_slice(&v.to_le_bytes());
    }
    let wl = Cube::new(wl_data, [4, 1, 1], 2, DataType::Float64).unwrap();
    append_cube(&path, "scenario 6", "wl", &wl).unwrap();

    let rank3 = list_rank_3(&path).unwrap();
    assert_eq!(rank3.len(), 1);
    assert_eq!(rank3[0].name, "cube");

    let rank2 = list_rank_2(&path).unwrap();
    assert_eq!(rank2.len(), 1);
    assert_eq!(rank2[0].name, "wl");

    let (_, loaded_cube) = load_by_name_rank3(&path, "cube").unwrap().unwrap();
    assert_eq!(loaded_cube.data(), cube_values.as_slice());

    let (_, loaded_wl) = matfive::load_by_name_rank2(&path, "wl").unwrap().unwrap();
    let recovered: Vec<f64> =
        loaded_wl.data().chunks_exact(8).map(|c| f64::from_le_bytes(c.try_into().unwrap())).collect();
    assert_eq!(recovered, vec![1.0, 2.0, 3.0, 4.0]);
}
