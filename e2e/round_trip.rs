//! Round-trip coverage across every supported numeric type and both ranks,
//! through the public save/load API rather than the internal encoder/decoder
//! directly.

use matfive::{load_by_name, save_cube, Cube, DataType};

fn bytes_for(dtype: DataType, count: usize, fill: u8) -> Vec<u8> {
    vec![fill; count * dtype.byte_width()]
}

#[test]
fn every_numeric_type_round_trips_rank2() {
    let dir = tempfile::tempdir().unwrap();
    for (i, dtype) in [
        DataType::Float64,
        DataType::Float32,
        DataType::Uint8,
        DataType::Uint16,
        DataType::Int8,
        DataType::Int16,
    ]
    .into_iter()
    .enumerate()
    {
        let path = dir.path().join(format!("type_{i}.mat"));
        let data = bytes_for(dtype, 6, i as u8 + 1);
        let cube = Cube::new(data.clone(), [2, 3, 1], 2, dtype).unwrap();
        save_cube(&path, "round trip fixture", "m", &cube).unwrap();

        let (descriptor, loaded) = load_by_name(&path, "m", 2).unwrap().expect("matrix should load");
        assert_eq!(descriptor.dtype, dtype);
        assert_eq!(descriptor.dims, [2, 3, 1]);
        assert_eq!(loaded.data(), data.as_slice());
    }
}

#[test]
fn rank3_cube_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube3d.mat");
    let data = bytes_for(DataType::Float64, 2 * 3 * 4, 0xAB);
    let cube = Cube::new(data.clone(), [2, 3, 4], 3, DataType::Float64).unwrap();
    save_cube(&path, "rank3", "spectral", &cube).unwrap();

    let (descriptor, loaded) = load_by_name(&path, "spectral", 3).unwrap().unwrap();
    assert_eq!(descriptor.dims, [2, 3, 4]);
    assert_eq!(loaded.rank(), 3);
    assert_eq!(loaded.data(), data.as_slice());
}
