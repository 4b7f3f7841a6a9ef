use proptest::prelude::*;
use relief_geom::{IVec3, Vec3};

fn small_f32() -> impl Strategy<Value = f32> {
    -1_000.0f32..=1_000.0
}

fn small_i32() -> impl Strategy<Value = i32> {
    -1_000i32..=1_000
}

proptest! {
    // Component-wise addition commutes exactly in IEEE arithmetic
    #[test]
    fn vec3_add_commutes(ax in small_f32(), ay in small_f32(), az in small_f32(),
                         bx in small_f32(), by in small_f32(), bz in small_f32()) {
        let a = Vec3::new(ax, ay, az);
        let b = Vec3::new(bx, by, bz);
        prop_assert_eq!(a + b, b + a);
    }

    #[test]
    fn vec3_zero_is_identity(x in small_f32(), y in small_f32(), z in small_f32()) {
        let v = Vec3::new(x, y, z);
        prop_assert_eq!(v + Vec3::ZERO, v);
        prop_assert_eq!(v.dot(Vec3::ZERO), 0.0);
    }

    #[test]
    fn ivec3_add_sub_round_trip(ax in small_i32(), ay in small_i32(), az in small_i32(),
                                bx in small_i32(), by in small_i32(), bz in small_i32()) {
        let a = IVec3::new(ax, ay, az);
        let b = IVec3::new(bx, by, bz);
        prop_assert_eq!(a + b - b, a);
    }
}
